mod common;

use assert2::{check, let_assert};
use common::{build_engine, core_package, monorepo, plugins_package};
use docgraph::{DocsEngine, EngineOptions, MatchTier};
use rstest::rstest;
use serde_json::json;

fn qualified_names(engine: &DocsEngine, query: &str, filter: Option<&str>) -> Vec<String> {
    engine
        .search(query, filter)
        .iter()
        .map(|hit| hit.entry.qualified_name.clone())
        .collect()
}

#[rstest]
fn exact_match_ranks_first_then_qualified_then_depth(monorepo: DocsEngine) {
    let names = qualified_names(&monorepo, "Foo", None);
    check!(
        names
            == vec![
                "Foo",
                "FooOptions",
                "FooPlugin",
                "Foo.constructor",
                "Foo.send",
                "FooOptions.timeout",
                "FooPlugin.send",
                "createFoo",
            ]
    );
}

#[rstest]
fn match_tiers_are_reported(monorepo: DocsEngine) {
    let hits = monorepo.search("Foo", None);
    check!(hits[0].tier == MatchTier::Exact);
    check!(hits[1..].iter().all(|h| h.tier == MatchTier::QualifiedName));
}

#[rstest]
#[case("foo")]
#[case("FOO")]
#[case("  Foo  ")]
fn search_is_case_insensitive(monorepo: DocsEngine, #[case] query: &str) {
    let hits = monorepo.search(query, None);
    let_assert!(Some(first) = hits.first());
    check!(first.entry.qualified_name == "Foo");
}

#[rstest]
fn re_exported_symbol_appears_once(monorepo: DocsEngine) {
    let hits = monorepo.search("Foo", None);
    let foos: Vec<_> = hits.iter().filter(|h| h.entry.name == "Foo").collect();
    let_assert!([foo] = foos.as_slice());
    check!(foo.entry.package == "core");
}

#[rstest]
fn duplicate_declarations_collapse_to_home(monorepo: DocsEngine) {
    let hits = monorepo.search("Shared", None);
    let_assert!([shared] = hits.as_slice());
    check!(shared.entry.package == "core");

    let engine = build_engine(
        &[("core", core_package()), ("plugins", plugins_package())],
        &EngineOptions::default().with_home_package("plugins"),
    );
    let hits = engine.search("Shared", None);
    let_assert!([shared] = hits.as_slice());
    check!(shared.entry.package == "plugins");
}

#[rstest]
fn package_filter_disables_dedup(monorepo: DocsEngine) {
    let hits = monorepo.search("Shared", Some("plugins"));
    let_assert!([shared] = hits.as_slice());
    check!(shared.entry.package == "plugins");

    let names = qualified_names(&monorepo, "Foo", Some("plugins"));
    check!(names == vec!["FooPlugin", "FooPlugin.send"]);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_query_returns_nothing(monorepo: DocsEngine, #[case] query: &str) {
    check!(monorepo.search(query, None).is_empty());
}

#[rstest]
fn summary_matches_rank_last(monorepo: DocsEngine) {
    let hits = monorepo.search("central", None);
    let_assert!([hit] = hits.as_slice());
    check!(hit.entry.qualified_name == "Foo");
    check!(hit.tier == MatchTier::Summary);
    check!(hit.entry.summary == "The central client.");
}

#[rstest]
fn camel_case_words_match_as_tokens(monorepo: DocsEngine) {
    let hits = monorepo.search("options foo", None);
    let names: Vec<&str> = hits.iter().map(|h| h.entry.qualified_name.as_str()).collect();
    check!(names.contains(&"FooOptions"));
    check!(hits.iter().all(|h| h.tier == MatchTier::Token));
}

#[test]
fn alias_tag_is_searchable() {
    let tagged = json!({
        "id": 0, "name": "util", "kind": 1,
        "children": [{
            "id": 1, "name": "createClient", "kind": 64,
            "sources": [{ "fileName": "src/index.ts", "line": 1 }],
            "comment": {
                "summary": [{ "kind": "text", "text": "Makes a client." }],
                "blockTags": [{ "tag": "@alias", "content": [{ "kind": "text", "text": "makeClient" }] }]
            }
        }]
    });
    let engine = build_engine(&[("util", tagged)], &EngineOptions::default());

    let hits = engine.search("makeClient", None);
    let_assert!([hit] = hits.as_slice());
    check!(hit.tier == MatchTier::Exact);
    check!(hit.entry.name == "createClient");
    check!(hit.entry.aliases == vec!["makeClient".to_string()]);
}

#[test]
fn long_summaries_are_truncated() {
    let long = "word ".repeat(100);
    let package = json!({
        "id": 0, "name": "verbose", "kind": 1,
        "children": [{
            "id": 1, "name": "Chatty", "kind": 128,
            "sources": [{ "fileName": "src/index.ts", "line": 1 }],
            "comment": { "summary": [{ "kind": "text", "text": long }] }
        }]
    });
    let engine = build_engine(&[("verbose", package)], &EngineOptions::default().with_summary_budget(20));

    let hits = engine.search("Chatty", None);
    let_assert!([hit] = hits.as_slice());
    check!(hit.entry.summary.ends_with('…'));
    check!(hit.entry.summary.chars().count() <= 21);
}
