// Bot commands module
pub mod clear;
pub mod help;
pub mod info;
pub mod islamic;
pub mod logs;

use crate::{Data, Error};

/// Every command registered with the framework
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help::help(),
        info::ping(),
        info::info(),
        clear::clear(),
        logs::logs(),
        islamic::islamic(),
        islamic::hadith(),
        islamic::dua(),
        islamic::quran(),
    ]
}
