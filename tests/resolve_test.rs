mod common;

use assert2::{check, let_assert};
use common::monorepo;
use docgraph::{DocReference, DocsEngine, GlobalKey, Resolution};
use rstest::rstest;

#[rstest]
fn embedded_key_resolves_directly(monorepo: DocsEngine) {
    let reference = DocReference::named("FooOptions").with_key(GlobalKey::new("core", 6));

    let_assert!(Resolution::Internal { package, slug, .. } = monorepo.resolve_reference("core", &reference));
    check!(package == "core");
    check!(slug == "foooptions");
}

#[rstest]
fn qualified_name_in_declaring_package(monorepo: DocsEngine) {
    let reference = DocReference::named("send").with_qualified_name("Foo.send");

    let_assert!(Resolution::Internal { slug, .. } = monorepo.resolve_reference("core", &reference));
    check!(slug == "foo.send");
}

#[rstest]
fn re_export_resolves_to_declaring_package(monorepo: DocsEngine) {
    // `Foo` written in plugins names plugins' re-export, which aliases core's class.
    let reference = DocReference::named("Foo");

    let_assert!(Resolution::Internal { package, slug, key } = monorepo.resolve_reference("plugins", &reference));
    check!(package == "core");
    check!(slug == "foo");
    check!(key == GlobalKey::new("core", 1));
}

#[rstest]
fn inheritance_edges_resolve_across_packages(monorepo: DocsEngine) {
    let_assert!(Some(plugin) = monorepo.node_by_slug("plugins", "fooplugin"));
    let_assert!([extended] = plugin.extended_types.as_slice());
    let_assert!(Resolution::Internal { package, slug, .. } = monorepo.resolve_reference("plugins", extended));
    check!(package == "core");
    check!(slug == "foo");

    let_assert!(Some(send) = monorepo.node_by_slug("plugins", "fooplugin.send"));
    check!(send.flags.is_inherited);
    let_assert!(Some(inherited) = send.inherited_from.as_ref());
    let_assert!(Resolution::Internal { package, slug, .. } = monorepo.resolve_reference("plugins", inherited));
    check!(package == "core");
    check!(slug == "foo.send");
}

#[rstest]
fn exported_name_found_from_other_package(monorepo: DocsEngine) {
    let reference = DocReference::named("createFoo");

    let_assert!(Resolution::Internal { package, slug, .. } = monorepo.resolve_reference("plugins", &reference));
    check!(package == "core");
    check!(slug == "createfoo");
}

#[rstest]
fn unresolved_reference_is_a_value(monorepo: DocsEngine) {
    let reference = DocReference::named("Bar");

    let resolution = monorepo.resolve_reference("core", &reference);
    check!(resolution.is_unresolved());
    check!(resolution.key().is_none());
    let_assert!(Resolution::Unresolved { name, qualified_name } = resolution);
    check!(name == "Bar");
    check!(qualified_name.is_none());
}

#[rstest]
fn extractor_unresolved_reference_stays_unresolved(monorepo: DocsEngine) {
    let_assert!(Some(use_bar) = monorepo.node_by_slug("core", "usebar"));
    let references: Vec<&DocReference> = use_bar.references().collect();
    let_assert!([bar] = references.as_slice());
    check!(bar.name == "Bar");
    check!(monorepo.resolve_reference("core", bar).is_unresolved());
}

#[rstest]
fn external_url_is_the_fallback(monorepo: DocsEngine) {
    let reference = DocReference::named("Promise").with_external_url("https://developer.mozilla.org/Promise");

    let_assert!(Resolution::External { url } = monorepo.resolve_reference("core", &reference));
    check!(url == "https://developer.mozilla.org/Promise");
}

#[rstest]
fn in_graph_match_beats_external_url(monorepo: DocsEngine) {
    let reference = DocReference::named("Foo").with_external_url("https://example.com/Foo");

    check!(monorepo.resolve_reference("core", &reference).is_internal());
}

#[rstest]
fn stale_key_falls_through_to_name_lookup(monorepo: DocsEngine) {
    let reference = DocReference::named("Shared").with_key(GlobalKey::new("core", 999));

    let_assert!(Resolution::Internal { slug, .. } = monorepo.resolve_reference("core", &reference));
    check!(slug == "shared");
}

#[rstest]
fn package_hint_picks_exporter(monorepo: DocsEngine) {
    // Both packages declare `Shared`; the hint wins over home.
    let reference = DocReference::named("Shared").with_package("plugins");

    let_assert!(Resolution::Internal { package, .. } = monorepo.resolve_reference("elsewhere", &reference));
    check!(package == "plugins");

    let unhinted = DocReference::named("Shared");
    let_assert!(Resolution::Internal { package, .. } = monorepo.resolve_reference("elsewhere", &unhinted));
    check!(package == "core");
}

#[rstest]
#[case(DocReference::named("Foo"))]
#[case(DocReference::named("Bar"))]
#[case(DocReference::named("send").with_qualified_name("Foo.send"))]
#[case(DocReference::named("Promise").with_external_url("https://example.com/p"))]
fn resolution_is_idempotent(monorepo: DocsEngine, #[case] reference: DocReference) {
    let first = monorepo.resolve_reference("plugins", &reference);
    let second = monorepo.resolve_reference("plugins", &reference);
    check!(first == second);
}

#[rstest]
fn alias_nodes_point_at_declaration(monorepo: DocsEngine) {
    let_assert!(Some(alias) = monorepo.node_by_slug("plugins", "foo"));
    let_assert!(Some(target) = alias.alias_of.as_ref());
    let_assert!(Some(key) = monorepo.resolve_reference("plugins", target).key().cloned());
    check!(key == GlobalKey::new("core", 1));
}
