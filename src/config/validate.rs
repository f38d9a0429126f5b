// src/config/validate.rs

//! Turns a parsed `RawWatchfile` into a validated `Watchfile`.
//!
//! Everything that can be checked without evaluating statements is checked
//! here: regex and glob syntax, callback argument shapes, path-rule regexes.
//! Semantic issues (bad log level, empty group, ...) are left to the
//! evaluator, which reports them as diagnostics instead of failing.

use regex::Regex;

use crate::config::model::{
    RawPattern, RawStatement, RawStructuredPattern, RawWatch, RawWatchfile, Statement, Watchfile,
};
use crate::dsl::callbacks::CallbackEntry;
use crate::dsl::options::InteractorSetting;
use crate::errors::{Result, WatchfileError};
use crate::types::OneOrMany;
use crate::watch::{PathRuleOp, Pattern, Transform};

impl TryFrom<RawWatchfile> for Watchfile {
    type Error = WatchfileError;

    fn try_from(raw: RawWatchfile) -> std::result::Result<Self, Self::Error> {
        let statements = convert_block(raw.statement)?;
        Ok(Watchfile::new_unchecked(statements))
    }
}

fn convert_block(raw: Vec<RawStatement>) -> Result<Vec<Statement>> {
    raw.into_iter().map(convert_statement).collect()
}

fn convert_statement(raw: RawStatement) -> Result<Statement> {
    let stmt = match raw {
        RawStatement::Group(g) => Statement::Group {
            name: non_empty_name("group", g.name)?,
            options: g.options,
            body: convert_block(g.body.unwrap_or_default())?,
        },
        RawStatement::Guard(g) => Statement::Guard {
            name: non_empty_name("guard", g.name)?,
            options: g.options,
            body: convert_block(g.body)?,
        },
        RawStatement::Watch(w) => convert_watch(w)?,
        RawStatement::Callback(c) => {
            Statement::Callback(CallbackEntry::from_declaration(c.listener, c.events, c.args)?)
        }
        RawStatement::Notification(n) => Statement::Notification {
            library: n.library,
            options: n.options,
        },
        RawStatement::Interactor(i) => Statement::Interactor(InteractorSetting::from(i.options)),
        RawStatement::Logger(decl) => Statement::Logger(decl),
        RawStatement::Scope(decl) => Statement::Scope(decl),
        RawStatement::Ignore(r) => path_rule(PathRuleOp::Ignore, r.patterns)?,
        RawStatement::IgnoreReplace(r) => path_rule(PathRuleOp::IgnoreReplace, r.patterns)?,
        RawStatement::Filter(r) => path_rule(PathRuleOp::Filter, r.patterns)?,
        RawStatement::FilterReplace(r) => path_rule(PathRuleOp::FilterReplace, r.patterns)?,
        RawStatement::IgnorePaths(p) => Statement::IgnorePaths(p.paths),
    };
    Ok(stmt)
}

fn non_empty_name(kind: &str, name: String) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(WatchfileError::ConfigError(format!(
            "`{kind}` statement needs a non-empty `name`"
        )));
    }
    Ok(trimmed.to_string())
}

fn convert_watch(w: RawWatch) -> Result<Statement> {
    let pattern = match w.pattern {
        RawPattern::Literal(path) | RawPattern::Structured(RawStructuredPattern::Literal(path)) => {
            Pattern::literal(path)
        }
        RawPattern::Structured(RawStructuredPattern::Regex(src)) => Pattern::regex(&src)?,
        RawPattern::Structured(RawStructuredPattern::Glob(src)) => Pattern::glob(&src)?,
    };
    let action = w
        .action
        .map(|templates| Transform::from_templates(templates.into_vec()));
    Ok(Statement::Watch { pattern, action })
}

fn path_rule(op: PathRuleOp, patterns: OneOrMany<String>) -> Result<Statement> {
    let patterns = patterns
        .into_vec()
        .into_iter()
        .map(|src| {
            Regex::new(&src).map_err(|e| WatchfileError::InvalidPattern {
                pattern: src.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Statement::PathRule { op, patterns })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Watchfile> {
        let raw: RawWatchfile = toml::from_str(src)?;
        Watchfile::try_from(raw)
    }

    #[test]
    fn nested_statements_keep_their_shape() {
        let wf = parse(
            r#"
[[statement]]
kind = "group"
name = "backend"

  [[statement.body]]
  kind = "guard"
  name = "rspec"

    [[statement.body.body]]
    kind = "watch"
    pattern = { regex = '.*_spec\.rb' }
"#,
        )
        .unwrap();

        match &wf.statements()[0] {
            Statement::Group { name, body, .. } => {
                assert_eq!(name, "backend");
                match &body[0] {
                    Statement::Guard { name, body, .. } => {
                        assert_eq!(name, "rspec");
                        assert!(matches!(body[0], Statement::Watch { .. }));
                    }
                    other => panic!("expected guard, got {other:?}"),
                }
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = parse("[[statement]]\nkind = \"eval\"\ncode = \"puts 1\"\n").unwrap_err();
        assert!(matches!(err, WatchfileError::TomlError(_)));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse("[[statement]]\nkind = \"guard\"\nname = \"rspec\"\ncolour = true\n").unwrap_err();
        assert!(matches!(err, WatchfileError::TomlError(_)));
    }

    #[test]
    fn bad_watch_regex_is_an_invalid_pattern() {
        let err = parse(
            "[[statement]]\nkind = \"guard\"\nname = \"x\"\n[[statement.body]]\nkind = \"watch\"\npattern = { regex = \"(\" }\n",
        )
        .unwrap_err();
        assert!(matches!(err, WatchfileError::InvalidPattern { .. }));
    }

    #[test]
    fn bang_path_rules_parse() {
        let wf = parse(
            "[[statement]]\nkind = \"ignore!\"\npatterns = \"bar\"\n[[statement]]\nkind = \"filter\"\npatterns = ['\\.rb$', 'txt']\n",
        )
        .unwrap();
        assert!(matches!(
            wf.statements()[0],
            Statement::PathRule { op: PathRuleOp::IgnoreReplace, .. }
        ));
        match &wf.statements()[1] {
            Statement::PathRule { op, patterns } => {
                assert_eq!(*op, PathRuleOp::Filter);
                assert_eq!(patterns.len(), 2);
            }
            other => panic!("expected path rule, got {other:?}"),
        }
    }

    #[test]
    fn positional_callback_with_mixed_array() {
        let wf = parse(
            "[[statement]]\nkind = \"callback\"\nargs = [\"notify\", [\"start\", \"stop\"]]\n",
        )
        .unwrap();
        match &wf.statements()[0] {
            Statement::Callback(entry) => {
                assert_eq!(entry.listener().as_str(), "notify");
                assert_eq!(entry.events().len(), 2);
            }
            other => panic!("expected callback, got {other:?}"),
        }
    }
}
