//! Rule definitions read from JSON files and command line flags

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use xml_rule_engine::{Matched, Rule, RuleKind};

use crate::report::{Payload, Recorder};

/// One rule as written by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    pub kind: RuleKind,
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Contents of a `--rules` file
#[derive(Debug, Default, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

impl RuleFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rules file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse rules file {}", path.display()))
    }
}

/// Combine rules from a `--rules` file with `--rule` flags, file rules first.
///
/// Fails when neither source yields a rule.
pub fn merge_rules(file: Option<RuleFile>, flags: &[RuleDef]) -> Result<Vec<RuleDef>> {
    let mut defs = file.map(|file| file.rules).unwrap_or_default();
    defs.extend(flags.iter().cloned());
    if defs.is_empty() {
        bail!("no rules given; pass --rules FILE or --rule KIND:DEPTH[:NAME]");
    }
    Ok(defs)
}

impl RuleDef {
    /// Build an engine rule whose handler appends a record to `recorder`.
    ///
    /// Goes through the kind-checked constructors, so a named comment rule or
    /// an unnamed element rule is rejected here.
    pub fn build(&self, recorder: &Recorder) -> xml_rule_engine::Result<Rule> {
        let sink = recorder.clone();
        let (kind, depth) = (self.kind, self.depth);
        match &self.name {
            None => Rule::unnamed(kind, depth, move |node, text| {
                sink.push(kind, depth, node, Payload::Text(text.to_string()));
                Ok(())
            }),
            Some(name) => Rule::named(kind, depth, name.as_str(), move |node, matched| {
                let payload = match matched {
                    Matched::Attributes(attributes) => Payload::from(attributes),
                    Matched::Text(text) => Payload::Text(text.to_string()),
                };
                sink.push(kind, depth, node, payload);
                Ok(())
            }),
        }
    }
}

impl FromStr for RuleDef {
    type Err = String;

    /// Parse `KIND:DEPTH[:NAME]`; the name may itself contain `:`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let kind = match parts.next().unwrap_or_default() {
            "element" => RuleKind::Element,
            "content" => RuleKind::Content,
            "comment" => RuleKind::Comment,
            other => return Err(format!("unknown rule kind `{}`", other)),
        };
        let depth = parts
            .next()
            .ok_or_else(|| format!("missing depth in `{}`", s))?
            .parse::<usize>()
            .map_err(|e| format!("invalid depth in `{}`: {}", s, e))?;
        let name = parts.next().map(str::to_string);
        Ok(RuleDef { kind, depth, name })
    }
}

impl fmt::Display for RuleDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.depth)?;
        if let Some(name) = &self.name {
            write!(f, ":{}", name)?;
        }
        Ok(())
    }
}
