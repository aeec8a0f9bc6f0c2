//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use kawigi_core::DataType;
use serde::Serialize;

use crate::harness::{extract_harness, generate_harness, insert_harness};
use crate::problem::{ClassDecl, Test};
use crate::profile::{LanguageProfile, ProfileRegistry, Target, language_info};
use crate::settings::Settings;
use crate::template;

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (16 MB)
///
/// Larger inputs are rejected before reading.
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Read a source file, refusing anything above `MAX_SOURCE_SIZE`.
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Load preferences, or an empty store when no file was given.
pub fn load_settings(path: Option<&Path>) -> CliResult<Settings> {
    match path {
        Some(path) => Settings::load(path).map_err(|e| CliError::failure(format!("Error: {e}"))),
        None => Ok(Settings::new()),
    }
}

fn load_problem(path: &Path) -> CliResult<ClassDecl> {
    ClassDecl::load(path).map_err(|e| CliError::failure(format!("Error: {e}")))
}

fn resolve_profile<'r>(registry: &'r ProfileRegistry, lang: &str) -> CliResult<&'r dyn LanguageProfile> {
    registry.by_name(lang).ok_or_else(|| {
        let known: Vec<&str> = registry.iter().map(|p| p.namespace()).collect();
        CliError::failure(format!("Unknown language '{lang}' (expected one of: {})", known.join(", ")))
    })
}

// ============================================================================
// Commands
// ============================================================================

/// `kawigi languages`
pub fn list_languages() -> CliResult<ExitCode> {
    let registry = ProfileRegistry::new();
    for profile in registry.iter() {
        let info = language_info(profile.id());
        println!("{:<8} {:<8} .{}", info.namespace, info.canonical, info.extension);
    }
    Ok(ExitCode::SUCCESS)
}

/// `kawigi skeleton`
pub fn print_skeleton(problem: &Path, lang: &str, settings: &Settings) -> CliResult<ExitCode> {
    let registry = ProfileRegistry::new();
    let profile = resolve_profile(&registry, lang)?;
    let class = load_problem(problem)?;

    let skeleton = template::skeleton(&class, Target::new(profile, settings));
    print!("{}", skeleton.text);
    eprintln!("caret: {}", skeleton.caret);
    Ok(ExitCode::SUCCESS)
}

/// `kawigi generate`
pub fn generate(problem: &Path, lang: &str, source: Option<&Path>, settings: &Settings) -> CliResult<ExitCode> {
    let registry = ProfileRegistry::new();
    let profile = resolve_profile(&registry, lang)?;
    let class = load_problem(problem)?;
    let target = Target::new(profile, settings);

    let output = match source {
        Some(path) => insert_harness(&read_source(path)?, &class, target),
        None => generate_harness(&class, target),
    };
    print!("{output}");
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct ParseReport<'a> {
    found: bool,
    skipped: usize,
    tests: &'a [Test],
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

/// `kawigi parse`
pub fn parse(problem: &Path, lang: &str, source: &Path, strip: bool, settings: &Settings) -> CliResult<ExitCode> {
    let registry = ProfileRegistry::new();
    let profile = resolve_profile(&registry, lang)?;
    let mut class = load_problem(problem)?;
    let text = read_source(source)?;

    let parsed = extract_harness(&text, &mut class, Target::new(profile, settings));
    let report = ParseReport {
        found: parsed.found,
        skipped: parsed.skipped,
        tests: class.tests(),
        source: strip.then_some(parsed.source.as_str()),
    };
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::failure(format!("Error serializing tests: {e}")))?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

/// `kawigi compare`; exits with failure when the values differ.
pub fn compare(ty: &str, expected: &str, actual: &str) -> CliResult<ExitCode> {
    let ty = resolve_type(ty)?;
    if kawigi_core::compare(actual, expected, ty) {
        println!("Match :-)");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("DOESN'T MATCH!!!!");
        Ok(ExitCode::FAILURE)
    }
}

/// Accepts canonical spellings and any language's native type name.
fn resolve_type(name: &str) -> CliResult<DataType> {
    ProfileRegistry::new()
        .resolve_type_name(name)
        .ok_or_else(|| CliError::failure(format!("Unknown type '{name}'")))
}

// ============================================================================
// Tests
// ============================================================================
