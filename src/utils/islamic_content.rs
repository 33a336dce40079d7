// Islamic content for the hadith, dua and reminder commands

use rand::prelude::IndexedRandom;

pub struct Hadith {
    pub text: &'static str,
    pub source: &'static str,
}

pub struct Verse {
    pub text: &'static str,
    pub reference: &'static str,
}

pub struct Dua {
    pub name: &'static str,
    pub arabic: &'static str,
    pub translation: &'static str,
}

pub const HADITHS: &[Hadith] = &[
    Hadith {
        text: "The Messenger of Allah (ﷺ) said, 'The world is sweet and green, and verily Allah is going to install you as vicegerent in it in order to see how you act. So avoid the allurement of women: verily, the first trial for the people of Israel was caused by women.'",
        source: "Sahih Muslim",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'Religion is very easy and whoever overburdens himself in his religion will not be able to continue in that way. So you should not be extremists, but try to be near to perfection and receive the good tidings that you will be rewarded.'",
        source: "Sahih al-Bukhari",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'The best among you are those who have the best manners and character.'",
        source: "Sahih al-Bukhari",
    },
    Hadith {
        text: "Allah's Messenger (ﷺ) said, 'Whoever builds a mosque for Allah, Allah will build for him likewise in Paradise.'",
        source: "Sahih al-Bukhari",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'Do not wish to be like anyone except in two cases: A person whom Allah has given wealth and he spends it righteously, and a person whom Allah has given wisdom and he acts according to it and teaches it to others.'",
        source: "Sahih al-Bukhari",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'When Allah loves a servant, He calls Gabriel and says: I love so-and-so, so love him. Then Gabriel loves him and makes an announcement in heaven: Allah loves so-and-so, so love him. Then the inhabitants of heaven love him, and he is given acceptance on earth.'",
        source: "Sahih al-Bukhari and Muslim",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'The believer's shade on the Day of Resurrection will be his charity.'",
        source: "Tirmidhi",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'A Muslim is the one who avoids harming Muslims with his tongue and hands. And a Muhajir (emigrant) is the one who gives up (abandons) all what Allah has forbidden.'",
        source: "Sahih al-Bukhari",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'Whoever is not merciful to others will not be treated mercifully.'",
        source: "Sahih al-Bukhari",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'Make things easy and do not make them difficult, cheer the people up by conveying glad tidings to them and do not repulse them.'",
        source: "Sahih al-Bukhari",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'The signs of a hypocrite are three: When he speaks, he lies; when he promises, he breaks his promise; and when he is entrusted with something, he betrays that trust.'",
        source: "Sahih al-Bukhari",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'None of you truly believes until he loves for his brother what he loves for himself.'",
        source: "Sahih al-Bukhari and Muslim",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'The most beloved of deeds to Allah are those that are most consistent, even if it is small.'",
        source: "Sahih al-Bukhari and Muslim",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'Allah does not look at your figures, nor at your attire but He looks at your hearts and accomplishments.'",
        source: "Sahih Muslim",
    },
    Hadith {
        text: "The Prophet (ﷺ) said, 'The strong person is not the one who overcomes people by his strength, but the strong person is the one who controls himself while in anger.'",
        source: "Sahih al-Bukhari",
    },
];

pub const VERSES: &[Verse] = &[
    Verse {
        text: "Indeed, Allah is with those who fear Him and those who are doers of good.",
        reference: "An-Nahl 16:128",
    },
    Verse {
        text: "And whoever relies upon Allah - then He is sufficient for him. Indeed, Allah will accomplish His purpose. Allah has already set for everything a [decreed] extent.",
        reference: "At-Talaq 65:3",
    },
    Verse {
        text: "And whoever fears Allah - He will make for him a way out. And will provide for him from where he does not expect.",
        reference: "At-Talaq 65:2-3",
    },
    Verse {
        text: "And We have already created man and know what his soul whispers to him, and We are closer to him than his jugular vein.",
        reference: "Qaf 50:16",
    },
    Verse {
        text: "So remember Me; I will remember you. And be grateful to Me and do not deny Me.",
        reference: "Al-Baqarah 2:152",
    },
    Verse {
        text: "Those who believe and whose hearts find rest in the remembrance of Allah, Verily, in the remembrance of Allah do hearts find rest.",
        reference: "Ar-Ra'd 13:28",
    },
    Verse {
        text: "And your Lord says, 'Call upon Me; I will respond to you.'",
        reference: "Ghafir 40:60",
    },
    Verse {
        text: "For indeed, with hardship [will be] ease. Indeed, with hardship [will be] ease.",
        reference: "Ash-Sharh 94:5-6",
    },
    Verse {
        text: "And whoever puts all his trust in Allah, then He will suffice him.",
        reference: "At-Talaq 65:3",
    },
];

pub const DUAS: &[Dua] = &[
    Dua {
        name: "Morning Supplication",
        arabic: "أَصْبَحْنَا وَأَصْبَحَ الْمُلْكُ لِلَّهِ، وَالْحَمْدُ لِلَّهِ، لاَ إِلَٰهَ إِلاَّ اللهُ وَحْدَهُ لاَ شَرِيكَ لَهُ",
        translation: "We have reached the morning and at this very time all sovereignty belongs to Allah, and all praise is for Allah. None has the right to be worshipped except Allah, alone, without any partner.",
    },
    Dua {
        name: "Evening Supplication",
        arabic: "أَمْسَيْنَا وَأَمْسَى الْمُلْكُ للهِ، وَالْحَمْدُ للهِ، لَا إِلَهَ إِلَّا اللهُ وَحْدَهُ لَا شَرِيكَ لَهُ",
        translation: "We have reached the evening and at this very time all sovereignty belongs to Allah, and all praise is for Allah. None has the right to be worshipped except Allah, alone, without any partner.",
    },
    Dua {
        name: "Before Sleeping",
        arabic: "بِاسْمِكَ اللَّهُمَّ أَمُوتُ وَأَحْيَا",
        translation: "In Your name, O Allah, I die and I live.",
    },
    Dua {
        name: "When Waking Up",
        arabic: "الْحَمْدُ لِلَّهِ الَّذِي أَحْيَانَا بَعْدَ مَا أَمَاتَنَا وَإِلَيْهِ النُّشُورُ",
        translation: "All praise is for Allah who gave us life after having taken it from us and unto Him is the resurrection.",
    },
    Dua {
        name: "Entering the Mosque",
        arabic: "اللَّهُمَّ افْتَحْ لِي أَبْوَابَ رَحْمَتِكَ",
        translation: "O Allah, open the gates of Your mercy for me.",
    },
    Dua {
        name: "Leaving the Mosque",
        arabic: "اللَّهُمَّ إِنِّي أَسْأَلُكَ مِنْ فَضْلِكَ",
        translation: "O Allah, I ask You from Your favour.",
    },
    Dua {
        name: "Before Eating",
        arabic: "بِسْمِ اللهِ",
        translation: "In the name of Allah.",
    },
    Dua {
        name: "After Eating",
        arabic: "الْحَمْدُ لِلَّهِ الَّذِي أَطْعَمَنِي هَذَا، وَرَزَقَنِيهِ، مِنْ غَيْرِ حَوْلٍ مِنِّي وَلَا قُوَّةٍ",
        translation: "All praise is for Allah who fed me this and provided it for me without any might or power on my part.",
    },
    Dua {
        name: "When Afflicted with Hardship",
        arabic: "لَا إِلَهَ إِلَّا أَنْتَ سُبْحَانَكَ إِنِّي كُنْتُ مِنَ الظَّالِمِينَ",
        translation: "There is no deity except You; exalted are You. Indeed, I have been of the wrongdoers.",
    },
    Dua {
        name: "For Anxiety and Sorrow",
        arabic: "اللَّهُمَّ إِنِّي عَبْدُكَ، ابْنُ عَبْدِكَ، ابْنُ أَمَتِكَ، نَاصِيَتِي بِيَدِكَ، مَاضٍ فِيَّ حُكْمُكَ، عَدْلٌ فِيَّ قَضَاؤُكَ",
        translation: "O Allah, I am Your servant, son of Your servant, son of Your maidservant, my forelock is in Your hand, Your command over me is forever executed and Your decree over me is just.",
    },
];

pub fn random_hadith() -> Option<&'static Hadith> {
    HADITHS.choose(&mut rand::rng())
}

pub fn random_verse() -> Option<&'static Verse> {
    VERSES.choose(&mut rand::rng())
}

pub fn random_dua() -> Option<&'static Dua> {
    DUAS.choose(&mut rand::rng())
}

/// Find a dua by exact name first, then by partial name, ignoring case
pub fn find_dua(query: &str) -> Option<&'static Dua> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    DUAS.iter()
        .find(|d| d.name.to_lowercase() == query)
        .or_else(|| DUAS.iter().find(|d| d.name.to_lowercase().contains(&query)))
}

/// Bulleted list of every dua name
pub fn dua_names() -> String {
    DUAS.iter()
        .map(|d| format!("• {}", d.name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_dua_exact_and_partial() {
        assert_eq!(find_dua("before eating").map(|d| d.name), Some("Before Eating"));
        assert_eq!(find_dua("  BEFORE SLEEPING ").map(|d| d.name), Some("Before Sleeping"));
        assert_eq!(find_dua("mosque").map(|d| d.name), Some("Entering the Mosque"));
        assert_eq!(find_dua("Leaving").map(|d| d.name), Some("Leaving the Mosque"));
        assert!(find_dua("travel").is_none());
        assert!(find_dua("").is_none());
    }

    #[test]
    fn test_random_picks_exist() {
        assert!(random_hadith().is_some());
        assert!(random_verse().is_some());
        assert!(random_dua().is_some());
    }

    #[test]
    fn test_dua_names_lists_all() {
        assert_eq!(dua_names().lines().count(), DUAS.len());
        assert!(dua_names().starts_with("• Morning Supplication"));
    }
}
