use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use ldgraph::{Processed, Record, Session, Settings, TypeSource};

const MAPPINGS: &str = r#"{
    "categories": { "people": "Person", "talks": "Event" },
    "fields": {
        "title": "name",
        "summary": "description",
        "tags": "keywords",
        "date": "startDate",
        "url": "url",
        "image": "image"
    }
}"#;

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn site_settings() -> Settings {
    Settings { site_url: "https://x.test".into(), ..Settings::default() }
}

#[test]
fn full_build() {
    let root = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(root.path().join("mappings.json"), MAPPINGS).unwrap();

    let mut session = Session::new(site_settings(), Some(root.path()));
    let records = [
        Record::new("Jane Doe", "jane-doe")
            .with_category("people")
            .with_summary("<p>Engineer</p>")
            .with_url("people/jane-doe.html")
            .with_image("/images/jane.png"),
        Record::new("RustConf Keynote", "")
            .with_category("Talks")
            .with_tags(["rust", "keynote"])
            .with_date("2024-09-10T09:00:00-07:00".parse().unwrap())
            .with_url("https://y.test/z"),
        Record::new("Unpublished", "unpublished").with_status("draft"),
    ];

    let outcomes: Vec<_> = records.iter().map(|r| session.process(r)).collect();
    assert!(matches!(&outcomes[0], Processed::Added(slug) if &**slug == "jane-doe"));
    assert!(matches!(&outcomes[1], Processed::Added(slug) if &**slug == "rustconf-keynote"));
    assert!(matches!(&outcomes[2], Processed::Skipped(_)));

    let summary = session.finalize(output.path()).unwrap();
    assert_eq!(summary.entities, 2);
    assert_eq!(summary.individual, 2);

    let graph_path = output.path().join("jsonld/graph.jsonld");
    assert_eq!(summary.graph.as_deref(), Some(&*graph_path));

    let graph = read_json(&graph_path);
    assert_eq!(graph, json!({
        "@context": "https://schema.org/",
        "@graph": [
            {
                "@type": "Person",
                "name": "Jane Doe",
                "description": "Engineer",
                "url": "https://x.test/people/jane-doe.html",
                "image": "https://x.test/images/jane.png",
            },
            {
                "@type": "Event",
                "name": "RustConf Keynote",
                "keywords": ["rust", "keynote"],
                "startDate": "2024-09-10T09:00:00-07:00",
                "url": "https://y.test/z",
            },
        ],
    }));

    let jane = read_json(&output.path().join("jsonld/jane-doe.json"));
    assert_eq!(jane, graph["@graph"][0]);
    let talk = read_json(&output.path().join("jsonld/rustconf-keynote.json"));
    assert_eq!(talk, graph["@graph"][1]);
    assert!(!output.path().join("jsonld/unpublished.json").exists());
}

#[test]
fn url_resolution() {
    let output = tempfile::tempdir().unwrap();
    let settings = Settings { mappings_file: None, ..site_settings() };
    let mut session = Session::new(settings, None);

    session.process(&Record::new("About", "about").with_url("about"));
    session.process(&Record::new("Elsewhere", "elsewhere").with_url("https://y.test/z"));
    session.finalize(output.path()).unwrap();

    let about = read_json(&output.path().join("jsonld/about.json"));
    assert_eq!(about["url"], "https://x.test/about");
    let elsewhere = read_json(&output.path().join("jsonld/elsewhere.json"));
    assert_eq!(elsewhere["url"], "https://y.test/z");
}

#[test]
fn empty_build_writes_nothing() {
    let output = tempfile::tempdir().unwrap();
    let settings = Settings { mappings_file: None, ..Settings::default() };
    let mut session = Session::new(settings, None);
    session.process(&Record::new("Draft", "draft").with_status("draft"));

    let summary = session.finalize(output.path()).unwrap();
    assert!(summary.graph.is_none());
    assert_eq!(summary.entities, 0);
    assert!(!output.path().join("jsonld").exists());
}

#[test]
fn individual_export_can_be_disabled() {
    let output = tempfile::tempdir().unwrap();
    let settings = Settings {
        mappings_file: None,
        export_individual: false,
        output_path: "ld".into(),
        graph_filename: "site.jsonld".into(),
        ..Settings::default()
    };

    let mut session = Session::new(settings, None);
    session.process(&Record::new("Jane Doe", "jane-doe"));
    let summary = session.finalize(output.path()).unwrap();

    assert_eq!(summary.individual, 0);
    assert!(output.path().join("ld/site.jsonld").exists());
    assert!(!output.path().join("ld/jane-doe.json").exists());
}

#[test]
fn graph_keeps_every_entity() {
    let output = tempfile::tempdir().unwrap();
    let settings = Settings { mappings_file: None, ..Settings::default() };
    let mut session = Session::new(settings, None);

    for i in 0..25 {
        session.process(&Record::new(format!("Item {i}"), format!("item-{i}")));
    }

    session.process(&Record::new("Item 3 again", "item-3"));
    session.finalize(output.path()).unwrap();

    let graph = read_json(&output.path().join("jsonld/graph.jsonld"));
    assert_eq!(graph["@graph"].as_array().map(Vec::len), Some(26));
    assert_eq!(session.lookup("item-3").and_then(|e| e.get("name")).and_then(|v| v.as_str()), Some("Item 3 again"));

    let item = read_json(&output.path().join("jsonld/item-3.json"));
    assert_eq!(item["name"], "Item 3 again");
}

#[test]
fn injects_into_written_html() {
    let output = tempfile::tempdir().unwrap();
    let settings = Settings { mappings_file: None, ..Settings::default() };
    let mut session = Session::new(settings, None);
    session.process(&Record::new("Jane Doe", "jane-doe").with_category("people"));

    let pages = output.path().join("people");
    fs::create_dir_all(&pages).unwrap();
    let jane = pages.join("jane-doe.html");
    let other = pages.join("john-roe.html");
    let html = "<html><head><title>Jane</title></head><body></body></html>";
    fs::write(&jane, html).unwrap();
    fs::write(&other, html).unwrap();

    assert!(session.content_written(&jane));
    assert!(!session.content_written(&other));
    assert!(!session.content_written(&pages.join("missing.html")));

    let injected = fs::read_to_string(&jane).unwrap();
    let start = injected.find("<script type=\"application/ld+json\">").unwrap();
    assert!(start < injected.find("</head>").unwrap());
    assert_eq!(fs::read_to_string(&other).unwrap(), html);

    let payload = &injected[injected.find(">\n{").unwrap() + 2..injected.find("\n</script>").unwrap()];
    let entity: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(entity, json!({ "@type": "Person", "name": "Jane Doe" }));
}

#[test]
fn injection_can_be_disabled() {
    let output = tempfile::tempdir().unwrap();
    let settings = Settings { mappings_file: None, inject: false, ..Settings::default() };
    let mut session = Session::new(settings, None);
    session.process(&Record::new("Jane Doe", "jane-doe"));

    let page = output.path().join("jane-doe.html");
    fs::write(&page, "<head></head>").unwrap();
    assert!(!session.content_written(&page));
    assert_eq!(fs::read_to_string(&page).unwrap(), "<head></head>");
}

#[test]
fn reset_between_builds() {
    let root = tempfile::tempdir().unwrap();
    let mappings = root.path().join("mappings.json");
    let settings = Settings { type_source: TypeSource::Category, ..Settings::default() };
    let mut session = Session::new(settings, Some(root.path()));

    let talk = Record::new("Keynote", "keynote").with_category("talks");
    session.process(&talk);
    assert_eq!(session.lookup("keynote").map(|e| e.kind()), Some("Thing"));

    fs::write(&mappings, MAPPINGS).unwrap();
    session.reset();
    assert!(session.graph().is_empty());

    session.process(&talk);
    assert_eq!(session.lookup("keynote").map(|e| e.kind()), Some("Event"));
    assert_eq!(session.graph().len(), 1);
}

#[test]
fn bad_mappings_fall_back_to_defaults() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("mappings.json"), "{ not json").unwrap();

    let mut session = Session::new(Settings::default(), Some(root.path()));
    session.process(&Record::new("Jane Doe", "jane-doe").with_category("people"));
    assert_eq!(session.lookup("jane-doe").map(|e| e.kind()), Some("Person"));
}

#[test]
fn manifest_records() {
    let manifest = r#"
        [[items]]
        title = "Jane Doe"
        slug = "jane-doe"
        category = "people"
        tags = ["a", "b"]
        date = 2024-03-01
        source_path = "content/people/jane-doe.md"
        jobTitle = "Engineer"
    "#;

    #[derive(serde::Deserialize)]
    struct Manifest {
        items: Vec<Record>,
    }

    let manifest: Manifest = toml::from_str(manifest).unwrap();
    let settings = Settings { mappings_file: None, type_source: TypeSource::Folder, ..Settings::default() };
    let mut session = Session::new(settings, None);
    session.process(&manifest.items[0]);

    let entity = serde_json::to_value(session.lookup("jane-doe").unwrap()).unwrap();
    assert_eq!(entity, json!({
        "@type": "Person",
        "name": "Jane Doe",
        "keywords": ["a", "b"],
        "dateCreated": "2024-03-01",
    }));
}
