use geojson::JsonValue;
use rdm2geojson_core::{
    export, AppConfig, Category, CategoryFilter, Config, DatabaseConfig, ExportError, Filters,
    InstanceRow, InstanceSource, LogLevel, MemorySource, ReplaceRule, Selection,
};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

fn filter(pattern: &str, replace: Vec<ReplaceRule>) -> CategoryFilter {
    CategoryFilter {
        enabled: pattern.to_string(),
        replace,
    }
}

fn config(precision: u32) -> Config {
    Config {
        app: AppConfig {
            log_level: LogLevel::Info,
            precision,
        },
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 3306,
            user: "rdm".to_string(),
            password: "secret".to_string(),
            name: "rdmdb".to_string(),
            connect_timeout: 5,
        },
        filters: Filters {
            quest: filter("%", vec![ReplaceRule::new("_quest", "")]),
            raid: filter("%", vec![]),
            iv: filter("iv_%", vec![ReplaceRule::new("iv_", "IV ")]),
        },
    }
}

fn no_customs() -> &'static Path {
    Path::new("does-not-exist")
}

fn name_of(feature: &JsonValue, key: &str) -> String {
    feature["properties"][key]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

fn sample_source() -> MemorySource {
    MemorySource::new()
        .with_rows(
            Category::Quest,
            vec![InstanceRow::new(
                "q1",
                r#"{"area":[[{"lon":1.23456,"lat":2.34567}]]}"#,
            )],
        )
        .with_rows(
            Category::Raid,
            vec![
                InstanceRow::new("raid_a", r#"{"area":[{"lat":10.0,"lon":20.0}]}"#),
                InstanceRow::new("raid_b", r#"{"area":[]}"#),
            ],
        )
        .with_rows(
            Category::Iv,
            vec![
                InstanceRow::new("iv_north", r#"{"area":[{"lat":1.0,"lon":2.0},{"lat":3.0,"lon":4.0}]}"#),
                InstanceRow::new("other", r#"{"area":[{"lat":0.0,"lon":0.0}]}"#),
            ],
        )
}

#[test]
fn quest_row_becomes_rounded_polygon() {
    let selection = Selection {
        quest: true,
        ..Selection::default()
    };
    let (collection, stats) =
        export(&config(3), &selection, no_customs(), || Ok(sample_source())).unwrap();

    assert_eq!(stats.quest, 1);
    assert_eq!(collection.features.len(), 1);
    let feature = &collection.features[0];
    assert_eq!(
        feature["geometry"],
        json!({"type": "Polygon", "coordinates": [[[1.235, 2.346]]]})
    );
    assert_eq!(name_of(feature, "original_name"), "q1");
    assert_eq!(name_of(feature, "name"), "q1");
    assert_eq!(name_of(feature, "type"), "quest");
}

#[test]
fn nothing_selected_yields_empty_collection() {
    let (collection, stats) = export(&config(5), &Selection::default(), no_customs(), || {
        Ok(sample_source())
    })
    .unwrap();

    assert_eq!(stats.total(), 0);
    assert_eq!(
        serde_json::to_value(&collection).unwrap(),
        json!({"type": "FeatureCollection", "features": []})
    );
}

#[test]
fn categories_follow_fixed_order_and_filters() {
    let selection = Selection {
        quest: true,
        raid: true,
        iv: true,
        customs: false,
    };
    let (collection, stats) =
        export(&config(5), &selection, no_customs(), || Ok(sample_source())).unwrap();

    let originals: Vec<String> = collection
        .features
        .iter()
        .map(|f| name_of(f, "original_name"))
        .collect();
    // "other" is filtered out by the iv LIKE pattern.
    assert_eq!(originals, ["q1", "raid_a", "raid_b", "iv_north"]);
    assert_eq!((stats.quest, stats.raid, stats.iv), (1, 2, 1));

    let iv = &collection.features[3];
    assert_eq!(name_of(iv, "name"), "IV north");
    assert_eq!(name_of(iv, "type"), "iv");
    assert_eq!(
        iv["geometry"],
        json!({"type": "MultiPoint", "coordinates": [[2.0, 1.0], [4.0, 3.0]]})
    );

    // An empty circle list is still a valid (empty) MultiPoint.
    assert_eq!(
        collection.features[2]["geometry"],
        json!({"type": "MultiPoint", "coordinates": []})
    );
}

#[test]
fn customs_come_first() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("parks.json"),
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"park","type":"custom"},
             "geometry":{"type":"Point","coordinates":[5,6]}}
        ]}"#,
    )
    .unwrap();

    let selection = Selection {
        quest: true,
        raid: true,
        iv: true,
        customs: true,
    };
    let (collection, stats) =
        export(&config(5), &selection, dir.path(), || Ok(sample_source())).unwrap();

    assert_eq!(stats.customs, 1);
    assert_eq!(stats.total(), 5);
    assert_eq!(name_of(&collection.features[0], "name"), "park");
    assert_eq!(name_of(&collection.features[1], "original_name"), "q1");

    let written = serde_json::to_string(&collection).unwrap();
    assert!(written.starts_with(r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"name":"park""#));
    assert!(written.contains(r#""coordinates":[5,6]"#));
}

#[test]
fn malformed_area_aborts_the_run() {
    let source = MemorySource::new().with_rows(
        Category::Raid,
        vec![
            InstanceRow::new("ok", r#"{"area":[{"lat":1.0,"lon":2.0}]}"#),
            InstanceRow::new("broken", r#"{"area":"nope"}"#),
        ],
    );
    let selection = Selection {
        raid: true,
        ..Selection::default()
    };

    let err = export(&config(5), &selection, no_customs(), || Ok(source)).unwrap_err();
    match err {
        ExportError::MalformedArea { category, name, .. } => {
            assert_eq!(category, Category::Raid);
            assert_eq!(name, "broken");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_area_or_data_is_malformed() {
    let selection = Selection {
        quest: true,
        ..Selection::default()
    };

    for row in [
        InstanceRow::new("no_area", r#"{"radius":70}"#),
        InstanceRow::new("no_rings", r#"{"area":[]}"#),
        InstanceRow {
            name: "null_data".to_string(),
            data: None,
        },
    ] {
        let source = MemorySource::new().with_rows(Category::Quest, vec![row]);
        let result = export(&config(5), &selection, no_customs(), || Ok(source));
        assert!(matches!(result, Err(ExportError::MalformedArea { .. })));
    }
}

/// Records fetches and whether `close` ran.
struct TrackedSource {
    inner: MemorySource,
    closed: Rc<Cell<bool>>,
    fetched: Rc<RefCell<Vec<Category>>>,
    fail_on: Option<Category>,
}

impl TrackedSource {
    fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            closed: Rc::new(Cell::new(false)),
            fetched: Rc::new(RefCell::new(Vec::new())),
            fail_on: None,
        }
    }
}

impl InstanceSource for TrackedSource {
    fn fetch(&mut self, category: Category, pattern: &str) -> rdm2geojson_core::Result<Vec<InstanceRow>> {
        self.fetched.borrow_mut().push(category);
        if self.fail_on == Some(category) {
            return Err(ExportError::Query {
                category,
                message: "lost connection".to_string(),
            });
        }
        self.inner.fetch(category, pattern)
    }

    fn close(self) -> rdm2geojson_core::Result<()> {
        self.closed.set(true);
        Ok(())
    }
}

#[test]
fn session_is_closed_even_when_nothing_is_selected() {
    let source = TrackedSource::new(MemorySource::new());
    let closed = source.closed.clone();
    let fetched = source.fetched.clone();

    export(&config(5), &Selection::default(), no_customs(), || Ok(source)).unwrap();
    assert!(closed.get());
    assert!(fetched.borrow().is_empty());
}

#[test]
fn session_is_closed_when_a_query_fails() {
    let source = TrackedSource {
        fail_on: Some(Category::Raid),
        ..TrackedSource::new(sample_source())
    };
    let closed = source.closed.clone();
    let selection = Selection {
        quest: true,
        raid: true,
        ..Selection::default()
    };

    let err = export(&config(5), &selection, no_customs(), || Ok(source)).unwrap_err();
    assert!(matches!(err, ExportError::Query { category: Category::Raid, .. }));
    assert!(closed.get());
}

#[test]
fn connection_failure_is_propagated() {
    let result = export(&config(5), &Selection::default(), no_customs(), || {
        Err::<MemorySource, _>(ExportError::DatabaseConnection("refused".to_string()))
    });
    assert!(matches!(result, Err(ExportError::DatabaseConnection(_))));
}

#[test]
fn categories_are_queried_in_fixed_order() {
    let source = TrackedSource::new(sample_source());
    let fetched = source.fetched.clone();
    let selection = Selection {
        quest: true,
        raid: true,
        iv: true,
        customs: false,
    };

    export(&config(5), &selection, no_customs(), || Ok(source)).unwrap();
    assert_eq!(
        *fetched.borrow(),
        vec![Category::Quest, Category::Raid, Category::Iv]
    );
}

#[test]
fn unselected_categories_are_not_queried() {
    let source = TrackedSource::new(sample_source());
    let fetched = source.fetched.clone();
    let selection = Selection {
        iv: true,
        quest: true,
        ..Selection::default()
    };

    export(&config(5), &selection, no_customs(), || Ok(source)).unwrap();
    assert_eq!(*fetched.borrow(), vec![Category::Quest, Category::Iv]);
}
