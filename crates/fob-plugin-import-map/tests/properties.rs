//! Property tests for module map and stylesheet construction.

use fob_html::{BuildCommand, ConfigEnv, HtmlPlugin};
use fob_plugin_import_map::{
    CssSource, ImportMap, ImportMapOptions, ImportMapPlugin, ModuleDescriptor,
    collect_stylesheets,
};
use indexmap::IndexMap;
use proptest::prelude::*;

fn css_strategy() -> impl Strategy<Value = Option<CssSource>> {
    prop_oneof![
        Just(None),
        "[a-z]{1,6}\\.css".prop_map(|s| Some(CssSource::One(s))),
        prop::collection::vec("[a-z]{1,6}\\.css", 0..4).prop_map(|v| Some(CssSource::Many(v))),
    ]
}

fn module_strategy() -> impl Strategy<Value = (ModuleDescriptor, Option<CssSource>)> {
    (
        "[a-e]{1,2}",
        prop::option::of("/[a-z]{1,8}\\.js"),
        css_strategy(),
    )
        .prop_map(|(name, path, css)| {
            let mut module = ModuleDescriptor::new(name);
            module.path = path;
            if let Some(css) = css.clone() {
                module = module.with_css(css);
            }
            (module, css)
        })
}

proptest! {
    #[test]
    fn module_map_keeps_last_path_per_name(
        input in prop::collection::vec(module_strategy(), 0..12)
    ) {
        let modules: Vec<ModuleDescriptor> = input.iter().map(|(m, _)| m.clone()).collect();
        let map = ImportMap::from_modules(&modules);

        let mut expected: IndexMap<String, String> = IndexMap::new();
        for module in &modules {
            if let Some(path) = &module.path {
                expected.insert(module.name.clone(), path.clone());
            }
        }

        prop_assert_eq!(map.as_map(), &expected);
    }

    #[test]
    fn stylesheet_count_and_order(
        input in prop::collection::vec(module_strategy(), 0..12)
    ) {
        let modules: Vec<ModuleDescriptor> = input.iter().map(|(m, _)| m.clone()).collect();
        let sheets = collect_stylesheets(&modules);

        let expected: Vec<String> = input
            .iter()
            .flat_map(|(_, css)| match css {
                None => Vec::new(),
                Some(CssSource::One(url)) => vec![url.clone()],
                Some(CssSource::Many(urls)) => urls.clone(),
            })
            .collect();

        prop_assert_eq!(sheets, expected);
    }

    #[test]
    fn build_transform_has_single_trailing_importmap(
        input in prop::collection::vec(module_strategy(), 1..8),
        css_serve in any::<bool>(),
    ) {
        let modules: Vec<ModuleDescriptor> = input.into_iter().map(|(m, _)| m).collect();
        let plugin = ImportMapPlugin::new(
            ImportMapOptions::new().modules(modules).with_css_serve(css_serve),
        );
        plugin.configure(&ConfigEnv::new(BuildCommand::Build)).unwrap();

        let tags = plugin.transform_markup("<head></head>").unwrap().tags;
        let scripts: Vec<usize> = tags
            .iter()
            .enumerate()
            .filter(|(_, t)| t.tag == "script")
            .map(|(i, _)| i)
            .collect();

        prop_assert_eq!(scripts, vec![tags.len() - 1]);
        prop_assert_eq!(tags.len() - 1, plugin.stylesheets().len());

        let body: serde_json::Value =
            serde_json::from_str(tags[tags.len() - 1].children.as_deref().unwrap()).unwrap();
        let expected = serde_json::json!({ "imports": plugin.import_map().as_map() });
        prop_assert_eq!(body, expected);
    }

    #[test]
    fn empty_module_list_never_emits_tags(build in any::<bool>(), css_serve in any::<bool>()) {
        let plugin = ImportMapPlugin::new(ImportMapOptions::new().with_css_serve(css_serve));
        let command = if build { BuildCommand::Build } else { BuildCommand::Serve };
        plugin.configure(&ConfigEnv::new(command)).unwrap();
        prop_assert!(plugin.transform_markup("<head></head>").unwrap().tags.is_empty());
    }

    #[test]
    fn serve_transform_never_emits_importmap(
        input in prop::collection::vec(module_strategy(), 0..8),
        css_serve in any::<bool>(),
    ) {
        let modules: Vec<ModuleDescriptor> = input.into_iter().map(|(m, _)| m).collect();
        let plugin = ImportMapPlugin::new(
            ImportMapOptions::new().modules(modules).with_css_serve(css_serve),
        );
        plugin.configure(&ConfigEnv::new(BuildCommand::Serve)).unwrap();

        let tags = plugin.transform_markup("").unwrap().tags;
        prop_assert!(tags.iter().all(|t| t.tag == "link"));
        let expected = if css_serve { plugin.stylesheets().len() } else { 0 };
        prop_assert_eq!(tags.len(), expected);
    }
}
