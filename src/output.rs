use crate::pipeline::RunResult;
use crate::progress::format_elapsed;
use std::path::Path;
use std::time::Duration;
use terminal_size::{terminal_size, Width};

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const RED: &str = "\x1b[31m";
pub const GRAY: &str = "\x1b[90m";

// ============================================================================
// Stage banner display
// ============================================================================

/// Color options for stage banners
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerColor {
    /// Cyan - used for starting a stage
    Cyan,
    /// Green - used for successful completion
    Green,
    /// Red - used for failure
    Red,
    /// Yellow - used for degraded stages
    Yellow,
}

impl BannerColor {
    /// Get the ANSI color code for this banner color
    fn ansi_code(&self) -> &'static str {
        match self {
            BannerColor::Cyan => CYAN,
            BannerColor::Green => GREEN,
            BannerColor::Red => RED,
            BannerColor::Yellow => YELLOW,
        }
    }
}

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const MIN_BANNER_WIDTH: usize = 20;
const MAX_BANNER_WIDTH: usize = 80;

/// Get the current terminal width for banner display
fn get_terminal_width_for_banner() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Print a color-coded stage banner.
///
/// Banner format: `━━━ STAGE_NAME ━━━` with appropriate color.
/// The banner width adapts to terminal width (clamped between MIN and MAX).
///
/// # Example
/// ```ignore
/// print_stage_banner("REQUIREMENTS", BannerColor::Cyan);
/// // Output: ━━━━━━━━━━━━━━ REQUIREMENTS ━━━━━━━━━━━━━━
/// ```
pub fn print_stage_banner(stage_name: &str, color: BannerColor) {
    let terminal_width = get_terminal_width_for_banner();

    // Clamp banner width between MIN and MAX
    let banner_width = terminal_width.clamp(MIN_BANNER_WIDTH, MAX_BANNER_WIDTH);

    let stage_with_spaces = format!(" {} ", stage_name);
    let stage_len = stage_with_spaces.chars().count();

    // How many ━ characters go on each side
    let remaining = banner_width.saturating_sub(stage_len);
    let left_padding = remaining / 2;
    let right_padding = remaining - left_padding;

    let color_code = color.ansi_code();

    println!(
        "{}{BOLD}{}{}{}{}",
        color_code,
        "━".repeat(left_padding),
        stage_with_spaces,
        "━".repeat(right_padding),
        RESET
    );
}

pub fn print_header() {
    println!("{CYAN}{BOLD}");
    println!("+---------------------------------------------------------+");
    println!(
        "|  storyforge v{}                                       |",
        env!("CARGO_PKG_VERSION")
    );
    println!("+---------------------------------------------------------+");
    println!("{RESET}");
}

pub fn print_error(msg: &str) {
    println!("{RED}{BOLD}Error:{RESET} {}", msg);
}

pub fn print_warning(msg: &str) {
    println!("{YELLOW}Warning:{RESET} {}", msg);
}

pub fn print_info(msg: &str) {
    println!("{CYAN}Info:{RESET} {}", msg);
}

pub fn print_specification(spec_json: &str) {
    println!("{BLUE}Specification:{RESET}");
    println!("{DIM}{}{RESET}", spec_json);
}

pub fn print_written_files(label: &str, paths: &[String]) {
    println!("{BLUE}{label}:{RESET}");
    for path in paths {
        println!("  {GREEN}+{RESET} {}", path);
    }
}

pub fn print_run_summary(result: &RunResult, project_root: &Path, elapsed: Duration) {
    // code + tests + specification.json
    let total_files = result.code_paths.len() + result.test_paths.len() + 1;

    println!();
    println!("{GRAY}{}{RESET}", "-".repeat(57));
    println!(
        "{GREEN}{BOLD}Project generated{RESET} in {} ({} files)",
        format_elapsed(elapsed),
        total_files
    );
    println!("{BLUE}Title:{RESET}  {}", result.spec.title);
    println!("{BLUE}Root:{RESET}   {}", project_root.display());
    println!("{BLUE}Code:{RESET}   {} files", result.code_paths.len());
    println!("{BLUE}Tests:{RESET}  {} files", result.test_paths.len());
    if result.is_degraded() {
        println!(
            "{YELLOW}Degraded:{RESET} {} (built-in fallback output)",
            result.degraded_stages.join(", ")
        );
    }
    println!("{GRAY}{}{RESET}", "-".repeat(57));
    println!();
}

// ============================================================================
// Tests
// ============================================================================
