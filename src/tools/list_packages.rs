use crate::engine::DocsEngine;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Parameters for list_packages tool
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListPackagesRequest {
    /// Include packages that failed to build, with the reason
    #[serde(default)]
    pub include_skipped: bool,
}

/// List built packages in manifest order, marking the home package.
pub fn handle_list_packages(engine: &DocsEngine, request: &ListPackagesRequest) -> String {
    let packages = engine.list_packages();
    let mut output = String::new();

    if packages.is_empty() {
        output.push_str("No packages were built.\n");
    } else {
        let _ = writeln!(output, "Packages ({}):", packages.len());
        for package in &packages {
            let version = package
                .version
                .as_deref()
                .map(|v| format!(" v{v}"))
                .unwrap_or_default();
            let home = if package.is_home { " (home)" } else { "" };
            let _ = write!(output, "  • {}{}{} - {} nodes", package.name, version, home, package.node_count);
            if package.warning_count > 0 || package.error_count > 0 {
                let _ = write!(
                    output,
                    ", {} extractor warnings, {} errors",
                    package.warning_count, package.error_count
                );
            }
            output.push('\n');
        }
    }

    let warnings = engine.warnings();
    if !warnings.is_empty() {
        output.push('\n');
        if request.include_skipped {
            let _ = writeln!(output, "Skipped ({}):", warnings.len());
            for warning in warnings {
                let _ = writeln!(output, "  • {}: {}", warning.package, warning.message);
            }
        } else {
            let _ = writeln!(
                output,
                "{} package(s) skipped. Set include_skipped to see why.",
                warnings.len()
            );
        }
    }

    output
}
