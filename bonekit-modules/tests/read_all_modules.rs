//! Integration tests for building the module-conf index from a module tree

use bonekit_bones::{Datastore, Key, MemoryDatastore, SkeletonRegistry};
use bonekit_config::BonekitConfig;
use bonekit_modules::{read_all_modules, ModuleConf, ModuleTree, MODULE_CONF_KIND};
use serde_json::Value;

/// vi -> user -> {group, profile}, vi -> file, with profile linking back to user
fn app_tree() -> ModuleTree {
    let mut tree = ModuleTree::new("Vi");
    let root = tree.root();
    let user = tree.add_module(root, "user", "User").unwrap();
    tree.add_module(root, "file", "File").unwrap();
    tree.add_module(user, "group", "Group").unwrap();
    let profile = tree.add_module(user, "profile", "Profile").unwrap();
    tree.link(profile, "owner", user).unwrap();
    tree.link(profile, "vi", root).unwrap();
    tree
}

fn module_conf(config: &BonekitConfig) -> ModuleConf {
    ModuleConf::register(&mut SkeletonRegistry::new(), config).unwrap()
}

async fn stored_names(store: &MemoryDatastore) -> Vec<String> {
    store
        .query(MODULE_CONF_KIND, 100)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.key.name)
        .collect()
}

#[tokio::test]
async fn test_writes_every_module_once() {
    let store = MemoryDatastore::new();
    let conf = module_conf(&BonekitConfig::default());

    let written = read_all_modules(&app_tree(), &store, &conf).await.unwrap();
    assert_eq!(written, vec!["file", "user", "user.group", "user.profile"]);
    assert_eq!(stored_names(&store).await, written);

    let entity = store
        .get(&Key::new(MODULE_CONF_KIND, "user.profile"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entity.get("name"), Some(&Value::from("user.profile")));
}

#[tokio::test]
async fn test_second_run_writes_nothing() {
    let store = MemoryDatastore::new();
    let conf = module_conf(&BonekitConfig::default());
    read_all_modules(&app_tree(), &store, &conf).await.unwrap();

    let written = read_all_modules(&app_tree(), &store, &conf).await.unwrap();
    assert!(written.is_empty());
    assert_eq!(store.len().await, 4);
}

#[tokio::test]
async fn test_existing_records_keep_their_help_text() {
    let store = MemoryDatastore::new();
    let conf = module_conf(&BonekitConfig::default());

    let mut skel = conf.view_skel();
    skel.set_key("user.group");
    skel.set("name", Value::from("user.group")).unwrap();
    skel.set("help_text", Value::from("<b>Groups</b>")).unwrap();
    skel.to_db(&store).await.unwrap();

    let written = read_all_modules(&app_tree(), &store, &conf).await.unwrap();
    assert!(!written.contains(&"user.group".to_string()));

    let group = conf
        .get_by_module_name(&store, "user.group")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(group.get("help_text"), Some(&Value::from("<b>Groups</b>")));
}

#[tokio::test]
async fn test_nested_path_not_confused_with_leaf_name() {
    let store = MemoryDatastore::new();
    let conf = module_conf(&BonekitConfig::default());

    // A top-level "group" record must not stand in for "user.group"
    let mut skel = conf.view_skel();
    skel.set_key("group");
    skel.set("name", Value::from("group")).unwrap();
    skel.to_db(&store).await.unwrap();

    let written = read_all_modules(&app_tree(), &store, &conf).await.unwrap();
    assert!(written.contains(&"user.group".to_string()));
}

#[tokio::test]
async fn test_depth_from_config() {
    let store = MemoryDatastore::new();
    let mut config = BonekitConfig::default();
    config.module_conf.max_depth = 1;
    config.debug.trace = true;
    bonekit_common::init_tracing(config.debug.trace);
    let conf = module_conf(&config);

    let mut tree = ModuleTree::new("Vi");
    let a = tree.add_module(tree.root(), "a", "A").unwrap();
    let b = tree.add_module(a, "b", "B").unwrap();
    tree.add_module(b, "c", "C").unwrap();

    let written = read_all_modules(&tree, &store, &conf).await.unwrap();
    assert_eq!(written, vec!["a", "a.b"]);
}

#[tokio::test]
async fn test_records_past_query_limit_are_not_overwritten() {
    let store = MemoryDatastore::new();
    let mut config = BonekitConfig::default();
    config.module_conf.query_limit = 1;
    let conf = module_conf(&config);

    for (path, help) in [("file", "Files"), ("user", "<b>Users</b>")] {
        let mut skel = conf.view_skel();
        skel.set_key(path);
        skel.set("name", Value::from(path)).unwrap();
        skel.set("help_text", Value::from(help)).unwrap();
        skel.to_db(&store).await.unwrap();
    }

    // Only "file" fits in the name query, "user" must still be kept
    let written = read_all_modules(&app_tree(), &store, &conf).await.unwrap();
    assert_eq!(written, vec!["user.group", "user.profile"]);

    let user = conf
        .get_by_module_name(&store, "user")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.get("help_text"), Some(&Value::from("<b>Users</b>")));
}
