//! Historical starting data for the year 208 campaign

use crate::core::types::Trait;

/// Playable factions in id order
pub const FACTIONS: [&str; 3] = ["Wei", "Shu", "Wu"];

pub struct CityTemplate {
    pub name: &'static str,
    pub owner: &'static str,
    pub gold: u32,
    pub food: u32,
    pub troops: u32,
    pub defense: u8,
    pub morale: u8,
    pub agriculture: u8,
    pub commerce: u8,
    pub technology: u8,
    pub walls: u8,
}

pub const CITIES: [CityTemplate; 6] = [
    CityTemplate {
        name: "Xuchang",
        owner: "Wei",
        gold: 700,
        food: 1000,
        troops: 420,
        defense: 70,
        morale: 65,
        agriculture: 60,
        commerce: 65,
        technology: 55,
        walls: 70,
    },
    CityTemplate {
        name: "Luoyang",
        owner: "Wei",
        gold: 600,
        food: 900,
        troops: 360,
        defense: 60,
        morale: 60,
        agriculture: 55,
        commerce: 60,
        technology: 50,
        walls: 62,
    },
    CityTemplate {
        name: "Chengdu",
        owner: "Shu",
        gold: 650,
        food: 980,
        troops: 380,
        defense: 65,
        morale: 72,
        agriculture: 65,
        commerce: 58,
        technology: 52,
        walls: 66,
    },
    CityTemplate {
        name: "Hanzhong",
        owner: "Shu",
        gold: 560,
        food: 820,
        troops: 320,
        defense: 58,
        morale: 63,
        agriculture: 60,
        commerce: 52,
        technology: 48,
        walls: 60,
    },
    CityTemplate {
        name: "Jianye",
        owner: "Wu",
        gold: 680,
        food: 980,
        troops: 390,
        defense: 66,
        morale: 68,
        agriculture: 62,
        commerce: 64,
        technology: 54,
        walls: 65,
    },
    CityTemplate {
        name: "Wuchang",
        owner: "Wu",
        gold: 560,
        food: 820,
        troops: 310,
        defense: 58,
        morale: 61,
        agriculture: 58,
        commerce: 55,
        technology: 49,
        walls: 60,
    },
];

/// Borders between cities, listed once per pair
pub const ROADS: [(&str, &str); 6] = [
    ("Xuchang", "Luoyang"),
    ("Xuchang", "Hanzhong"),
    ("Luoyang", "Hanzhong"),
    ("Luoyang", "Wuchang"),
    ("Hanzhong", "Chengdu"),
    ("Jianye", "Wuchang"),
];

pub struct OfficerTemplate {
    pub name: &'static str,
    pub faction: &'static str,
    pub leadership: u8,
    pub intelligence: u8,
    pub politics: u8,
    pub charisma: u8,
    pub loyalty: u8,
    pub traits: &'static [Trait],
    /// Historical posting; subordinates may start elsewhere
    pub city: &'static str,
    pub ruler: bool,
}

pub const OFFICERS: [OfficerTemplate; 10] = [
    OfficerTemplate {
        name: "Cao Cao",
        faction: "Wei",
        leadership: 92,
        intelligence: 94,
        politics: 96,
        charisma: 90,
        loyalty: 90,
        traits: &[Trait::Charismatic, Trait::Scholar],
        city: "Xuchang",
        ruler: true,
    },
    OfficerTemplate {
        name: "Zhang Liao",
        faction: "Wei",
        leadership: 94,
        intelligence: 78,
        politics: 70,
        charisma: 76,
        loyalty: 80,
        traits: &[Trait::Brave],
        city: "Luoyang",
        ruler: false,
    },
    OfficerTemplate {
        name: "Xiahou Dun",
        faction: "Wei",
        leadership: 90,
        intelligence: 58,
        politics: 70,
        charisma: 80,
        loyalty: 95,
        traits: &[Trait::Brave, Trait::Strict],
        city: "Xuchang",
        ruler: false,
    },
    OfficerTemplate {
        name: "Liu Bei",
        faction: "Shu",
        leadership: 86,
        intelligence: 80,
        politics: 88,
        charisma: 96,
        loyalty: 90,
        traits: &[Trait::Benevolent, Trait::Charismatic],
        city: "Chengdu",
        ruler: true,
    },
    OfficerTemplate {
        name: "Guan Yu",
        faction: "Shu",
        leadership: 98,
        intelligence: 79,
        politics: 92,
        charisma: 84,
        loyalty: 85,
        traits: &[Trait::Brave, Trait::Strict],
        city: "Chengdu",
        ruler: false,
    },
    OfficerTemplate {
        name: "Zhang Fei",
        faction: "Shu",
        leadership: 97,
        intelligence: 65,
        politics: 60,
        charisma: 82,
        loyalty: 75,
        traits: &[Trait::Brave],
        city: "Chengdu",
        ruler: false,
    },
    OfficerTemplate {
        name: "Zhuge Liang",
        faction: "Shu",
        leadership: 72,
        intelligence: 100,
        politics: 95,
        charisma: 92,
        loyalty: 95,
        traits: &[Trait::Scholar, Trait::Engineer],
        city: "Hanzhong",
        ruler: false,
    },
    OfficerTemplate {
        name: "Sun Quan",
        faction: "Wu",
        leadership: 86,
        intelligence: 80,
        politics: 85,
        charisma: 92,
        loyalty: 88,
        traits: &[Trait::Charismatic, Trait::Merchant],
        city: "Jianye",
        ruler: true,
    },
    OfficerTemplate {
        name: "Zhou Yu",
        faction: "Wu",
        leadership: 90,
        intelligence: 92,
        politics: 88,
        charisma: 88,
        loyalty: 85,
        traits: &[Trait::Scholar, Trait::Engineer],
        city: "Jianye",
        ruler: false,
    },
    OfficerTemplate {
        name: "Lu Su",
        faction: "Wu",
        leadership: 70,
        intelligence: 88,
        politics: 90,
        charisma: 85,
        loyalty: 82,
        traits: &[Trait::Merchant, Trait::Benevolent],
        city: "Wuchang",
        ruler: false,
    },
];
