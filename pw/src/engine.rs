//! Resolution engine
//!
//! One call scans the template, classifies every distinct placeholder,
//! samples each referenced source at most once, and substitutes the resolved
//! values back into the template. Nothing outlives the call: the row cache
//! lives in a [`ResolutionContext`] that is dropped when the call returns.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::config::Config;
use crate::lines::{self, LineSample};
use crate::paths::{PathResolver, SourceKind};
use crate::placeholder::{self, Placeholder};
use crate::table::{self, DEFAULT_DELIMITER, TableSample};

/// Why a placeholder was left in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// `csv:` reference without both a path and a column
    Malformed,
    /// No source file for the path
    NotFound,
    /// The sampled row has no such column
    NoSuchColumn,
    /// The table has no data rows
    NoRows,
    /// The source could not be read or parsed
    SourceUnusable,
    /// The line list has no non-empty lines
    NoLines,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Malformed => "malformed table reference",
            Self::NotFound => "no matching source file",
            Self::NoSuchColumn => "column not in sampled row",
            Self::NoRows => "table has no data rows",
            Self::SourceUnusable => "source could not be read",
            Self::NoLines => "line list is empty",
        };
        write!(f, "{}", reason)
    }
}

/// Outcome of one resolution call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Template with every resolved placeholder substituted
    pub text: String,
    /// Placeholder text to substituted value
    pub values: BTreeMap<String, String>,
    /// Placeholder text to the reason it was left in place
    pub unresolved: BTreeMap<String, Unresolved>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// State scoped to a single resolution call
pub struct ResolutionContext<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    rows: HashMap<PathBuf, TableSample>,
    values: BTreeMap<String, String>,
    unresolved: BTreeMap<String, Unresolved>,
}

impl<'a, R: Rng + ?Sized> ResolutionContext<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            rows: HashMap::new(),
            values: BTreeMap::new(),
            unresolved: BTreeMap::new(),
        }
    }

    /// Sampled row for a table file, sampling it on first use
    ///
    /// Every later call for the same path sees the same sample.
    pub fn table_sample(&mut self, path: &Path, delimiter: u8) -> &TableSample {
        let rng = &mut *self.rng;
        self.rows.entry(path.to_path_buf()).or_insert_with(|| {
            debug!(path = %path.display(), "ResolutionContext::table_sample: sampling");
            table::sample_row(path, delimiter, rng)
        })
    }

    /// Pick a line from a line-list file
    pub fn line_sample(&mut self, path: &Path) -> LineSample {
        lines::pick_line(path, &mut *self.rng)
    }

    /// Number of distinct table files sampled so far
    pub fn sampled_tables(&self) -> usize {
        self.rows.len()
    }

    fn record(&mut self, text: &str, outcome: Result<String, Unresolved>) {
        match outcome {
            Ok(value) => {
                debug!(placeholder = text, value = %value, "ResolutionContext::record: resolved");
                self.values.insert(text.to_string(), value);
            }
            Err(reason) => {
                debug!(placeholder = text, %reason, "ResolutionContext::record: unresolved");
                self.unresolved.insert(text.to_string(), reason);
            }
        }
    }

    fn finish(self, template: &str) -> Resolution {
        Resolution {
            text: substitute(template, &self.values),
            values: self.values,
            unresolved: self.unresolved,
        }
    }
}

/// Resolves placeholders against a data root
#[derive(Debug, Clone)]
pub struct Resolver {
    paths: PathResolver,
    delimiter: u8,
}

impl Resolver {
    pub fn new(paths: PathResolver) -> Self {
        Self {
            paths,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Build a resolver from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let paths = PathResolver::new(&config.data_dir)
            .with_extensions(&config.table_extension, &config.line_extension);
        Self::new(paths).with_delimiter(config.delimiter_byte())
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Resolve a template using the thread-local RNG
    pub fn resolve(&self, template: &str) -> String {
        self.resolve_report(template).text
    }

    /// Resolve a template deterministically from a seed
    pub fn resolve_seeded(&self, template: &str, seed: u64) -> String {
        self.resolve_report_seeded(template, seed).text
    }

    /// Resolve a template and report what was left in place and why
    pub fn resolve_report(&self, template: &str) -> Resolution {
        self.resolve_with(template, &mut rand::rng())
    }

    /// Seeded variant of [`Resolver::resolve_report`]
    pub fn resolve_report_seeded(&self, template: &str, seed: u64) -> Resolution {
        self.resolve_with(template, &mut StdRng::seed_from_u64(seed))
    }

    /// Resolve a template with a caller-supplied RNG
    pub fn resolve_with<R: Rng + ?Sized>(&self, template: &str, rng: &mut R) -> Resolution {
        let placeholders: Vec<(String, Placeholder)> = placeholder::scan(template)
            .into_iter()
            .map(|text| {
                let parsed = Placeholder::parse(&text);
                (text, parsed)
            })
            .collect();
        debug!(count = placeholders.len(), "Resolver::resolve_with: scanned placeholders");

        let mut ctx = ResolutionContext::new(rng);

        // Table references first so every column of a file shares one row
        for (text, parsed) in &placeholders {
            match parsed {
                Placeholder::Malformed => ctx.record(text, Err(Unresolved::Malformed)),
                Placeholder::Table { path, column } => {
                    let outcome = self.resolve_table(&mut ctx, path, column);
                    ctx.record(text, outcome);
                }
                Placeholder::Line { .. } => {}
            }
        }

        for (text, parsed) in &placeholders {
            if let Placeholder::Line { path } = parsed {
                let outcome = self.resolve_line(&mut ctx, path);
                ctx.record(text, outcome);
            }
        }

        debug!(tables = ctx.sampled_tables(), "Resolver::resolve_with: done");
        ctx.finish(template)
    }

    fn resolve_table<R: Rng + ?Sized>(
        &self,
        ctx: &mut ResolutionContext<'_, R>,
        path: &str,
        column: &str,
    ) -> Result<String, Unresolved> {
        let resolved = self.paths.resolve(path, SourceKind::Table);
        if !resolved.found {
            return Err(Unresolved::NotFound);
        }

        match ctx.table_sample(&resolved.path, self.delimiter) {
            TableSample::Row(row) => row.get(column).cloned().ok_or(Unresolved::NoSuchColumn),
            TableSample::NoRows => Err(Unresolved::NoRows),
            TableSample::Unusable(_) => Err(Unresolved::SourceUnusable),
        }
    }

    fn resolve_line<R: Rng + ?Sized>(
        &self,
        ctx: &mut ResolutionContext<'_, R>,
        path: &str,
    ) -> Result<String, Unresolved> {
        let resolved = self.paths.resolve(path, SourceKind::Line);
        if !resolved.found {
            return Err(Unresolved::NotFound);
        }

        match ctx.line_sample(&resolved.path) {
            LineSample::Line(line) => Ok(line),
            LineSample::NoLines => Err(Unresolved::NoLines),
            LineSample::Unusable(_) => Err(Unresolved::SourceUnusable),
        }
    }
}

/// Replace every literal `{placeholder}` occurrence that has a value
///
/// The matcher is built from the resolved tokens only, longest first, so a
/// token nested inside an unresolved one is still replaced. Values are
/// inserted verbatim in a single pass and never scanned again.
fn substitute(template: &str, values: &BTreeMap<String, String>) -> String {
    if values.is_empty() {
        return template.to_string();
    }

    let mut tokens: Vec<(String, &str)> = values
        .iter()
        .map(|(text, value)| (format!("{{{}}}", text), value.as_str()))
        .collect();
    tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

    let alternation = tokens
        .iter()
        .map(|(token, _)| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");
    let matcher = match Regex::new(&alternation) {
        Ok(matcher) => matcher,
        Err(e) => {
            warn!("Failed to build substitution matcher, using placeholder scan: {}", e);
            return substitute_scanned(template, values);
        }
    };

    let replacements: HashMap<&str, &str> = tokens.iter().map(|(token, value)| (token.as_str(), *value)).collect();
    matcher
        .replace_all(template, |caps: &Captures| {
            let token = &caps[0];
            replacements.get(token).copied().unwrap_or(token).to_string()
        })
        .into_owned()
}

/// Replace the `{...}` tokens found by the placeholder scan
fn substitute_scanned(template: &str, values: &BTreeMap<String, String>) -> String {
    placeholder::pattern()
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
