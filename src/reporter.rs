//! Human-readable progress output for the CLI
//!
//! Presentation only; structured events go through `tracing`.

use colored::Colorize;

use crate::generator::OutputPaths;

#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    enabled: bool,
}

impl Reporter {
    /// Print progress to stdout
    pub fn console() -> Self {
        Self { enabled: true }
    }

    /// Print nothing
    pub fn quiet() -> Self {
        Self { enabled: false }
    }

    pub fn calling_model(&self) {
        if self.enabled {
            println!("{}", "Calling LLM … this may take half a minute.".yellow());
        }
    }

    pub fn warnings(&self, warnings: &[String]) {
        if !self.enabled {
            return;
        }
        for warning in warnings {
            println!("{} {}", "warning:".yellow().bold(), warning);
        }
    }

    pub fn generated(&self, paths: &OutputPaths) {
        if !self.enabled {
            return;
        }
        println!(
            "{} {} and {}\n",
            "Generated".green(),
            paths.adapter.display(),
            paths.mapping.display()
        );
        let name = paths
            .adapter
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("Open {} to inspect the stub.", name.bold());
    }
}
