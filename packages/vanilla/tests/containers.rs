use aspect_container::Data;
use aspect_data::DataManipulator;
use aspect_vanilla::{
    HorseColor, HorseData, HorseStyle, HorseVariant, ItemStackSnapshot, RepresentedItemData,
    StuckArrowsData,
};
use collection_literals::btree;
use serde_json::{json, Value as Json};

#[test]
fn test_horse_container_layout() {
    let horse = HorseData::new(HorseColor::DARK_BROWN, HorseStyle::WHITE_DOTS, HorseVariant::DONKEY);

    let expected = Data::Map(btree! {
        "HorseColor".to_string() => Data::from("dark_brown"),
        "HorseStyle".to_string() => Data::from("white_dots"),
        "HorseVariant".to_string() => Data::from("donkey"),
    });
    assert_eq!(horse.to_container(), expected);
    assert_eq!(HorseData::from_container(&expected).unwrap(), horse);
}

#[test]
fn test_represented_item_as_json() {
    let pot = RepresentedItemData::new(ItemStackSnapshot::new("minecraft:cactus", 1, 0));
    assert_eq!(
        Json::from(&pot.to_container()),
        json!({
            "RepresentedItem": {
                "item_type": "minecraft:cactus",
                "count": 1,
                "damage": 0
            }
        })
    );
}

#[test]
fn test_missing_entries_keep_defaults() {
    let data = Data::from(json!({ "HorseStyle": "black_dots" }));
    let horse = HorseData::from_container(&data).unwrap();
    assert_eq!(horse.color(), HorseColor::WHITE);
    assert_eq!(horse.style(), HorseStyle::BLACK_DOTS);

    let arrows = StuckArrowsData::from_container(&Data::from(json!({}))).unwrap();
    assert_eq!(arrows, StuckArrowsData::default());
}

#[test]
fn test_mistyped_entry_is_rejected() {
    let data = Data::from(json!({ "HorseColor": 4 }));
    assert!(HorseData::from_container(&data).is_err());

    let unknown = Data::from(json!({ "HorseColor": "purple" }));
    assert!(HorseData::from_container(&unknown).is_err());
}
