use cardgen::{CoverageReport, Generation};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print per-set coverage to stderr, plus combined totals when there are several sets.
pub fn print_generation(generation: &Generation, color: bool) {
    let palette = ansi::Palette::new(color);

    for (name, report) in &generation.reports {
        eprintln!("\n{}", palette.bold(palette.paint(format!("⚙  Coverage: {name}"), ansi::CYAN)));
        print_report(report, &palette);
    }

    if generation.reports.len() > 1 {
        eprintln!("\n{}", palette.bold(palette.paint("⚙  Coverage: all sets", ansi::CYAN)));
        print_report(&generation.combined, &palette);
    }
    eprintln!();
}

fn print_report(report: &CoverageReport, palette: &ansi::Palette) {
    eprintln!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    eprintln!(
        "  Attacks: {}  │  Implemented: {}  │  Unimplemented: {}",
        report.total_attacks(),
        palette.paint(report.implemented().to_string(), ansi::GREEN),
        palette.paint(report.unimplemented().to_string(), ansi::YELLOW),
    );
    eprintln!(
        "  Groups: {}  │  Rules fired: {}/{}  │  Operation kinds: {}",
        report.distinct_groups(),
        report.rules_fired(),
        report.grammar_rules(),
        report.operation_kinds().len(),
    );

    if !report.usage().hits().is_empty() {
        eprintln!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
        for (rule, count) in report.usage().hits() {
            eprintln!("  {} {}", palette.paint(format!("{count:>4}"), ansi::GREEN), rule);
        }
    }

    eprintln!("\n{}", palette.paint("━━━ Unimplemented ━━━", ansi::GRAY));
    let entries = report.entries();
    if entries.is_empty() {
        eprintln!("{}", palette.dim("  Every attack compiled"));
        return;
    }
    for entry in entries {
        eprintln!(
            "  {} {}",
            palette.paint(format!("{:>4}", entry.count), ansi::YELLOW),
            entry.fragments.join(palette.dim(" ∙ ").as_str())
        );
    }
}
