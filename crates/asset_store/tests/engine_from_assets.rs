use std::{collections::HashSet, fs};

use asset_store::{AssetStore, COLOR_ORDER_FILE, TRANSLATIONS_FILE};
use collection_engine::{
    default_categories, CategoryDef, CountSource, EngineContext, GridConfig, ItemCatalog,
    ItemMetadata, NeighborSentinels, RawItem,
};
use shared::domain::{CategoryId, HostTrigger, SortMode};

struct Minerals;

impl ItemCatalog for Minerals {
    fn metadata(&self, id: &str) -> Option<ItemMetadata> {
        let (name, price) = match id {
            "60" => ("Emerald", 250),
            "62" => ("Aquamarine", 180),
            "64" => ("Ruby", 250),
            "66" => ("Amethyst", 100),
            _ => return None,
        };
        Some(ItemMetadata {
            display_name: name.into(),
            price,
        })
    }

    fn tags(&self, id: &str) -> HashSet<String> {
        let tag = match id {
            "60" => "color_green",
            "62" => "color_aquamarine",
            "64" => "color_red",
            "66" => "color_purple",
            _ => return HashSet::new(),
        };
        HashSet::from([tag.to_string()])
    }
}

struct NoneFound;

impl CountSource for NoneFound {
    fn count(&self, _category: &CategoryDef, _id: &str) -> u32 {
        0
    }
}

const SENTINELS: NeighborSentinels = NeighborSentinels {
    up: 12347,
    down: -7777,
    left: 7001,
    right: -1,
};

const MINERALS: CategoryId = CategoryId(3);

#[test]
fn engine_orders_minerals_from_asset_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("mineral_sorting.json"),
        "// gems first\n[\"64\", \"60\", \"62\"]",
    )
    .expect("mineral order");
    fs::write(
        dir.path().join(COLOR_ORDER_FILE),
        r#"["color_red", "color_purple", "color_green"]"#,
    )
    .expect("color order");
    fs::write(dir.path().join("fish_sorting.json"), "not json").expect("broken fish order");
    fs::write(
        dir.path().join(TRANSLATIONS_FILE),
        r#"{ "Strings\\UI:Collections_Minerals": "Minerals", "sort-color": "By Color" }"#,
    )
    .expect("translations");

    let store = AssetStore::new(dir.path());
    let mut ctx: EngineContext<u32> = EngineContext::load(
        default_categories(),
        &store,
        GridConfig::default(),
        SENTINELS,
    );
    ctx.refresh_labels(&store.load_translations());

    assert!(ctx
        .registry()
        .get(CategoryId(1))
        .expect("fish")
        .canonical_order
        .is_empty());

    let items = [("66", 1), ("62", 2), ("60", 3), ("64", 4)]
        .map(|(id, handle)| RawItem::new(id, handle));
    assert_eq!(ctx.aggregate(MINERALS, items, &Minerals, &NoneFound), 4);

    let view = ctx.handle_trigger(MINERALS, HostTrigger::Open).expect("view");
    let handles: Vec<u32> = view.pages[0].slots.iter().map(|s| s.handle).collect();
    assert_eq!(handles, [4, 3, 2, 1]);

    ctx.set_mode(MINERALS, SortMode::Count);
    let view = ctx.handle_trigger(MINERALS, HostTrigger::Select).expect("view");
    assert_eq!(view.mode, SortMode::Color);
    let ids: Vec<&str> = view.pages[0]
        .slots
        .iter()
        .map(|s| s.item_id.as_str())
        .collect();
    assert_eq!(ids, ["64", "66", "60", "62"]);
    assert_eq!(view.status.to_string(), "Minerals\nBy Color");
}
