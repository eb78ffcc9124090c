//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the webscout CLI.
//! Status lines go to stderr; only [`Output::report`] writes to stdout, so
//! `webscout research ... > report.md` captures the report alone.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the webscout banner
    pub fn banner(&self) {
        if self.colored {
            eprintln!(
                "\n   {}\n   {}\n   {}\n   {}\n   {}\n",
                r"__        _______ ____  ____   ____ ___  _   _ _____ ".bright_cyan().bold(),
                r"\ \      / / ____| __ )/ ___| / ___/ _ \| | | |_   _|".bright_cyan().bold(),
                r" \ \ /\ / /|  _| |  _ \\___ \| |  | | | | | | | | |  ".cyan().bold(),
                r"  \ V  V / | |___| |_) |___) | |__| |_| | |_| | | |  ".blue().bold(),
                r"   \_/\_/  |_____|____/|____/ \____\___/ \___/  |_|  ".blue().bold(),
            );
            eprintln!(
                "   {} {}\n",
                "Iterative web research".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            eprintln!(
                r"
__        _______ ____  ____   ____ ___  _   _ _____
\ \      / / ____| __ )/ ___| / ___/ _ \| | | |_   _|
 \ \ /\ / /|  _| |  _ \\___ \| |  | | | | | | | | |
  \ V  V / | |___| |_) |___) | |__| |_| | |_| | | |
   \_/\_/  |_____|____/|____/ \____\___/ \___/  |_|

   Iterative web research v{}
",
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✓".green().bold(), message.green());
        } else {
            eprintln!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "•".blue(), message);
        } else {
            eprintln!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            eprintln!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a step message (for multi-step operations)
    pub fn step(&self, step_num: usize, total: usize, message: &str) {
        if self.colored {
            eprintln!(
                "  {} {}",
                format!("[{}/{}]", step_num, total).dimmed(),
                message.bright_white()
            );
        } else {
            eprintln!("  [{}/{}] {}", step_num, total, message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            eprintln!(
                "  {} {} {}",
                "✓".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            eprintln!("  [CREATED] {} {}", file_type, path);
        }
    }

    /// Print a file skipped message
    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            eprintln!(
                "  {} {} {}",
                "○".yellow(),
                path.dimmed(),
                format!("({})", reason).yellow()
            );
        } else {
            eprintln!("  [SKIPPED] {} ({})", path, reason);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            eprintln!("\n  {}", title.bright_white().bold().underline());
        } else {
            eprintln!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            eprintln!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            eprintln!("    {}: {}", key, value);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            eprintln!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            eprintln!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            eprintln!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            eprintln!("     $ {}", cmd);
        }
    }

    /// Print completion message with next steps
    pub fn complete(&self, message: &str) {
        if self.colored {
            eprintln!("\n  {} {}", "🚀".green(), message.bright_green().bold());
        } else {
            eprintln!("\n  [DONE] {}", message);
        }
    }

    /// Print the finished report to stdout, uncolored
    pub fn report(&self, markdown: &str) {
        println!("{}", markdown.trim_end());
    }

    /// Print newline
    pub fn newline(&self) {
        eprintln!();
    }
}
