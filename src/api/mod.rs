// External API clients
pub mod hijri;
pub mod quran;
