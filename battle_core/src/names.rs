//! Name tables for generated enemies and ingredients.

use potion_rules::{EnemyKind, IngredientKind};

pub const NAMES_PER_KIND: usize = 10;

pub fn enemy_names(kind: EnemyKind) -> &'static [&'static str; NAMES_PER_KIND] {
    match kind {
        EnemyKind::Flaming => &[
            "Ember Imp",
            "Cinder Hound",
            "Ashen Wyrm",
            "Blaze Sprite",
            "Magma Crawler",
            "Pyre Warden",
            "Smoulder Fiend",
            "Scorch Bat",
            "Kiln Golem",
            "Flare Jackal",
        ],
        EnemyKind::Chilling => &[
            "Frost Wisp",
            "Rime Stalker",
            "Glacier Troll",
            "Sleet Wraith",
            "Icebound Knight",
            "Snow Hag",
            "Hoarfrost Lynx",
            "Permafrost Brute",
            "Blizzard Shade",
            "Floe Serpent",
        ],
        EnemyKind::Poisonous => &[
            "Nightshade Wretch",
            "Bog Lurker",
            "Venom Toad",
            "Blight Spider",
            "Mire Hag",
            "Toxin Slug",
            "Sporeling",
            "Hemlock Witch",
            "Fen Viper",
            "Rot Beetle",
        ],
        EnemyKind::Withering => &[
            "Gravecaller",
            "Dust Revenant",
            "Hollow Monk",
            "Barrow Wight",
            "Sapping Shade",
            "Crypt Leech",
            "Bone Weaver",
            "Ashen Widow",
            "Tomb Crow",
            "Husk Walker",
        ],
        EnemyKind::Healing => &[
            "Sister Alba",
            "Chapel Acolyte",
            "Lantern Bearer",
            "Saintly Hermit",
            "Mercy Oracle",
            "Vesper Cleric",
            "Balm Keeper",
            "Dawn Priest",
            "Halo Novice",
            "Grace Abbess",
        ],
        EnemyKind::Regenerative => &[
            "Verdant Shade",
            "Moss Shambler",
            "Bloom Dryad",
            "Thorn Shepherd",
            "Sap Elemental",
            "Root Mother",
            "Willow Spirit",
            "Fern Druid",
            "Lichen Hulk",
            "Spring Nymph",
        ],
        EnemyKind::Protective => &[
            "Stone Warden",
            "Granite Sentry",
            "Bulwark Ogre",
            "Shale Guardian",
            "Iron Oak",
            "Cliff Keeper",
            "Boulder Monk",
            "Quarry Giant",
            "Obsidian Aegis",
            "Clay Colossus",
        ],
        EnemyKind::Strengthening => &[
            "Blood Shaman",
            "War Drummer",
            "Crimson Berserker",
            "Rage Chanter",
            "Vein Mystic",
            "Battle Herald",
            "Scarlet Bard",
            "Marrow Priest",
            "Fury Totem",
            "Gore Captain",
        ],
        EnemyKind::Cleansing => &[
            "Brother Lux",
            "Font Keeper",
            "Pale Ascetic",
            "Salt Sage",
            "Lustral Monk",
            "Clearwater Nun",
            "Hyssop Friar",
            "Pure Flame",
            "White Pilgrim",
            "Silver Censer",
        ],
        EnemyKind::Joker => &[
            "Motley Fool",
            "Grinning Harlequin",
            "Cackling Mime",
            "Trickster Imp",
            "Jest Wraith",
            "Puppet Master",
            "Bell Capper",
            "Mad Juggler",
            "Riddle Goblin",
            "Court Jester",
        ],
    }
}

pub fn ingredient_names(kind: IngredientKind) -> &'static [&'static str; NAMES_PER_KIND] {
    match kind {
        IngredientKind::Flaming => &[
            "Ember Root",
            "Fire Salt",
            "Dragon Pepper",
            "Phoenix Down",
            "Sulfur Bloom",
            "Cinder Moss",
            "Blazing Thistle",
            "Ash Lotus",
            "Magma Pearl",
            "Scorch Cap",
        ],
        IngredientKind::Chilling => &[
            "Frost Lily",
            "Snow Pearl",
            "Glacier Mint",
            "Rime Lichen",
            "Ice Thistle",
            "Winter Berry",
            "Sleet Fern",
            "Hail Stone",
            "Polar Moss",
            "Tundra Bell",
        ],
        IngredientKind::Poisonous => &[
            "Nightshade",
            "Hemlock",
            "Toad Venom",
            "Wolfsbane",
            "Spider Silk",
            "Mire Fungus",
            "Adder Tongue",
            "Foxglove",
            "Bog Myrtle",
            "Blight Spore",
        ],
        IngredientKind::Withering => &[
            "Gravebloom",
            "Grave Dust",
            "Bone Meal",
            "Ghost Orchid",
            "Crypt Moss",
            "Mourning Ash",
            "Dead Nettle",
            "Wight Wax",
            "Raven Quill",
            "Husk Seed",
        ],
        IngredientKind::Healing => &[
            "Sunpetal",
            "Angel Root",
            "Holy Water",
            "Saint's Wort",
            "Golden Honey",
            "Heal-All",
            "Chapel Rose",
            "Lamb's Ear",
            "Dawn Dew",
            "Mercy Leaf",
        ],
        IngredientKind::Regenerative => &[
            "Troll Moss",
            "Spring Sap",
            "Evergreen Needle",
            "Willow Bark",
            "Renewal Seed",
            "Dryad Tear",
            "Fern Curl",
            "Living Vine",
            "Bloom Pollen",
            "Heartwood Chip",
        ],
        IngredientKind::Protective => &[
            "Stoneleaf",
            "Iron Bark",
            "Granite Dust",
            "Tortoise Shell",
            "Earth Clay",
            "Oak Resin",
            "Quartz Shard",
            "Boulder Moss",
            "Bulwark Root",
            "Shale Flake",
        ],
        IngredientKind::Strengthening => &[
            "Bloodmoss",
            "Ox Horn",
            "Battle Root",
            "Crimson Cap",
            "Bear Fat",
            "Giant's Toe",
            "War Pepper",
            "Vein Berry",
            "Bull Thistle",
            "Rage Seed",
        ],
        IngredientKind::Cleansing => &[
            "Dewdrop",
            "Sea Salt",
            "Hyssop",
            "White Sage",
            "Clear Quartz",
            "Moonwater",
            "Lustral Lily",
            "Pure Snow",
            "Silver Dust",
            "Spring Reed",
        ],
        IngredientKind::Chaos => &[
            "Jester's Cap",
            "Mad Mushroom",
            "Pixie Dust",
            "Riddle Root",
            "Wild Card",
            "Laughing Moss",
            "Fool's Gold",
            "Trickster Tail",
            "Bell Flower",
            "Whim Berry",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique_per_kind() {
        for kind in EnemyKind::ALL {
            let names: HashSet<_> = enemy_names(kind).iter().collect();
            assert_eq!(names.len(), NAMES_PER_KIND, "{kind:?}");
        }
        for kind in IngredientKind::ALL {
            let names: HashSet<_> = ingredient_names(kind).iter().collect();
            assert_eq!(names.len(), NAMES_PER_KIND, "{kind:?}");
        }
    }
}
