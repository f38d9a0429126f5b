use proptest::prelude::*;
use watchfile::config::Watchfile;
use watchfile::types::DEFAULT_GROUP;
use watchfile_test_utils::builders::{GroupBuilder, GuardBuilder, WatchfileBuilder};
use watchfile_test_utils::compile;

/// One top-level declaration: a plugin inside a named group, or a bare
/// plugin. Each plugin gets `n` literal watchers.
#[derive(Debug, Clone)]
enum Decl {
    Grouped { group: usize, watchers: usize },
    Bare { watchers: usize },
}

fn decl_strategy() -> impl Strategy<Value = Decl> {
    prop_oneof![
        (0..3usize, 0..6usize).prop_map(|(group, watchers)| Decl::Grouped { group, watchers }),
        (0..6usize).prop_map(|watchers| Decl::Bare { watchers }),
    ]
}

fn plugin(index: usize, watchers: usize) -> GuardBuilder {
    (0..watchers).fold(GuardBuilder::new(&format!("plugin_{index}")), |g, w| {
        g.watch_literal(&format!("file_{index}_{w}.rb"))
    })
}

fn build(decls: &[Decl]) -> Watchfile {
    decls
        .iter()
        .enumerate()
        .fold(WatchfileBuilder::new(), |b, (i, decl)| match decl {
            Decl::Grouped { group, watchers } => {
                b.group(GroupBuilder::new(&format!("group_{group}")).guard(plugin(i, *watchers)))
            }
            Decl::Bare { watchers } => b.guard(plugin(i, *watchers)),
        })
        .build()
}

proptest! {
    #[test]
    fn plugins_get_nearest_group_and_ordered_watchers(decls in proptest::collection::vec(decl_strategy(), 0..12)) {
        let spec = compile(build(&decls));

        prop_assert_eq!(spec.plugins.len(), decls.len());

        for (i, (decl, plugin)) in decls.iter().zip(spec.plugins.iter()).enumerate() {
            prop_assert_eq!(&plugin.name, &format!("plugin_{i}"));

            let (expected_group, watchers) = match decl {
                Decl::Grouped { group, watchers } => (format!("group_{group}"), *watchers),
                Decl::Bare { watchers } => (DEFAULT_GROUP.to_string(), *watchers),
            };
            prop_assert_eq!(&plugin.group, &expected_group);
            prop_assert_eq!(plugin.watchers.len(), watchers);

            for (w, watcher) in plugin.watchers.iter().enumerate() {
                prop_assert_eq!(watcher.pattern().as_str(), format!("file_{i}_{w}.rb"));
            }
        }

        prop_assert!(spec.diagnostics.is_empty());
    }
}
