//! Theme, app and template management against a sandboxed home dir.

mod support;

use pin::catalog::AppUpdate;
use pin::error::CatalogError;
use pin::registry::{App, AppRegistry};
use pin::scheme::Scheme;
use pin::splice::WriteMode;

use support::Sandbox;

#[tokio::test]
async fn new_theme_copies_the_active_scheme() {
    let sandbox = Sandbox::new("theme-copy");
    sandbox.custom_scheme("nord", "#2e3440");
    let catalog = sandbox.catalog();
    let nord = catalog.find_theme("nord").expect("nord");
    sandbox.applier().apply(&nord).await.expect("apply");

    let mine = catalog.create_theme("mine").expect("create");
    let scheme = Scheme::load(&mine.path).expect("load copy");
    assert_eq!(scheme.name, "mine");
    assert_eq!(scheme.palette.get("base00").map(String::as_str), Some("#2e3440"));

    let renamed = catalog.rename_theme("mine", "ours").expect("rename");
    assert!(renamed.path.ends_with("ours.yaml"));
    assert!(!mine.path.exists());

    catalog.delete_theme("ours").expect("delete");
    assert!(matches!(
        catalog.find_theme("ours"),
        Err(CatalogError::NotFound(_))
    ));
}

#[test]
fn template_lifecycle_keeps_the_selection_in_sync() {
    let sandbox = Sandbox::new("template-lifecycle");
    sandbox.write("kitty.conf", "x\n# START_PIN_HERE\nbg #111111\n# END_PIN_HERE\n");
    let catalog = sandbox.catalog();
    catalog
        .add_app(App {
            path: sandbox.path("kitty.conf").to_string_lossy().into_owned(),
            ..App::new("kitty")
        })
        .expect("add");

    let dark = catalog.create_template("kitty", "dark").expect("create");
    assert_eq!(std::fs::read_to_string(&dark).expect("read"), "bg #111111");

    let copy = catalog.copy_template("kitty", "dark").expect("copy");
    assert!(copy.ends_with("dark_1.mustache"));

    catalog
        .update_app(
            "kitty",
            AppUpdate {
                template: Some("dark_1".into()),
                write_mode: Some(WriteMode::Overwrite),
                ..AppUpdate::default()
            },
        )
        .expect("select copy");
    let renamed = catalog
        .rename_template("kitty", "dark_1", "night")
        .expect("rename");

    let registry = AppRegistry::load(&sandbox.config.paths.apps).expect("registry");
    let kitty = registry.get("kitty").expect("kitty");
    assert_eq!(kitty.template, renamed.to_string_lossy());
    assert_eq!(kitty.write_mode, WriteMode::Overwrite);

    let names: Vec<_> = catalog
        .templates("kitty")
        .expect("list")
        .into_iter()
        .map(|t| (t.name, t.selected))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Backup".to_string(), false),
            ("dark".to_string(), false),
            ("night".to_string(), true),
        ]
    );

    catalog.delete_template("kitty", "night").expect("delete");
    let registry = AppRegistry::load(&sandbox.config.paths.apps).expect("registry");
    assert!(registry.get("kitty").is_some_and(|app| app.template.is_empty()));

    catalog.remove_app("kitty").expect("remove");
    assert!(!sandbox.config.paths.app_templates("kitty").exists());
    assert!(catalog.apps().expect("apps").is_empty());
}
