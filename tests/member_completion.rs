use completion_cache::syntax::AccessLevel;
use completion_cache::{AccessFilter, Cache, CacheConfig, ResultView};
use test_utils::syntax::fixtures::{Geometry, geometry};

fn cache_for(g: &Geometry) -> Cache {
    Cache::new(g.tree.clone(), g.tree.root()).unwrap()
}

fn displays(view: &ResultView) -> Vec<&str> {
    view.iter().map(|e| e.display()).collect()
}

#[test]
fn test_derived_scope_has_direct_and_inherited_members() {
    let g = geometry();
    let cache = cache_for(&g);

    let view = cache.complete_cursor(g.circle, AccessFilter::All);
    assert_eq!(
        displays(&view),
        vec![
            "area()\tdouble",
            "radius\tdouble",
            "cached\tbool",
            "describe()\tstd::string",
            "create(int)\tShape*",
            "origin\tPoint",
            "id\tint",
        ]
    );

    let inherited: Vec<bool> = view.iter().map(|e| e.is_base_class()).collect();
    assert_eq!(inherited, vec![false, false, false, true, true, true, true]);
}

#[test]
fn test_constructor_not_inherited() {
    let g = geometry();
    let cache = cache_for(&g);

    assert!(displays(&cache.complete_cursor(g.shape, AccessFilter::All)).contains(&"Shape()\tconstructor"));
    assert!(
        cache
            .complete_cursor(g.circle, AccessFilter::All)
            .iter()
            .all(|e| e.display() != "Shape()\tconstructor")
    );
}

#[test]
fn test_public_only_excludes_protected_and_private() {
    let g = geometry();
    let cache = cache_for(&g);

    let view = cache.complete_cursor(g.circle, AccessFilter::PublicOnly);
    assert_eq!(
        displays(&view),
        vec!["area()\tdouble", "radius\tdouble", "describe()\tstd::string", "create(int)\tShape*"]
    );
    assert!(view.iter().all(|e| e.access() == AccessLevel::Public));
}

#[test]
fn test_subclass_and_same_scope_filters() {
    let g = geometry();
    let cache = cache_for(&g);

    let subclass = cache.complete_cursor(g.circle, AccessFilter::NonPrivate);
    assert_eq!(
        displays(&subclass),
        vec![
            "area()\tdouble",
            "radius\tdouble",
            "describe()\tstd::string",
            "create(int)\tShape*",
            "origin\tPoint",
        ]
    );

    let same_scope = cache.complete_cursor(g.circle, AccessFilter::SameScope);
    assert_eq!(
        displays(&same_scope),
        vec![
            "area()\tdouble",
            "radius\tdouble",
            "cached\tbool",
            "describe()\tstd::string",
            "create(int)\tShape*",
            "origin\tPoint",
        ]
    );
}

#[test]
fn test_protected_inheritance_restricts_access() {
    let g = geometry();
    let cache = cache_for(&g);

    let all = cache.complete_cursor(g.square, AccessFilter::All);
    let access: Vec<_> = all.iter().map(|e| (e.display(), e.access())).collect();
    assert_eq!(
        access,
        vec![
            ("side\tdouble", AccessLevel::Public),
            ("area()\tdouble", AccessLevel::Protected),
            ("describe()\tstd::string", AccessLevel::Protected),
            ("create(int)\tShape*", AccessLevel::Protected),
            ("origin\tPoint", AccessLevel::Protected),
            ("id\tint", AccessLevel::Private),
        ]
    );

    assert_eq!(
        displays(&cache.complete_cursor(g.square, AccessFilter::PublicOnly)),
        vec!["side\tdouble"]
    );
}

#[test]
fn test_unknown_scope_is_empty() {
    let g = geometry();
    let cache = cache_for(&g);
    assert!(cache.complete_cursor(g.main, AccessFilter::All).is_empty());
    assert!(
        cache
            .complete_cursor(completion_cache::NodeId(10_000), AccessFilter::All)
            .is_empty()
    );
}

#[test]
fn test_enum_scope_holds_its_constants() {
    let g = geometry();
    let cache = cache_for(&g);
    assert_eq!(
        displays(&cache.complete_cursor(g.color, AccessFilter::All)),
        vec!["Red\tColor", "Green\tColor", "Blue\tColor"]
    );
}

#[test]
fn test_without_inheritance_only_direct_members() {
    let g = geometry();
    let config = CacheConfig {
        index_inherited_members: false,
        ..CacheConfig::default()
    };
    let cache = Cache::with_config(g.tree.clone(), g.tree.root(), config).unwrap();
    assert_eq!(
        displays(&cache.complete_cursor(g.circle, AccessFilter::All)),
        vec!["area()\tdouble", "radius\tdouble", "cached\tbool"]
    );
    assert_eq!(cache.len(), 23);
}
