//! Terminal and JSON output.
//!
//! Human-readable lines are suppressed in `--json` mode, where commands print
//! a single JSON document on stdout instead. Warnings and errors go to stderr.

use std::fmt::Display;
use std::time::Duration;

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use turbo_catalog::format::{format_currency, format_rating, truncate_text, Currency};
use turbo_catalog::Product;
use turbo_state::FetchStatus;

#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    fn line(&self, marker: impl Display, msg: impl Display) {
        if !self.json {
            println!("{} {}", marker, msg);
        }
    }

    fn err_line(&self, marker: impl Display, msg: impl Display) {
        if !self.json {
            eprintln!("{} {}", marker, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.line(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.line(style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        self.err_line(style("⚠").yellow(), msg);
    }

    /// Errors are reported in JSON mode too, as `{"error": ...}` on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            self.err_line(style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.err_line(style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to encode output: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.line(format!("  {}:", style(key).dim()), value);
    }

    pub fn list_item(&self, item: &str) {
        self.line(format!("  {}", style("•").dim()), item);
    }

    /// Products as an aligned table; favorites are marked with a heart.
    pub fn product_table<'a>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
        currency: Currency,
        is_favorite: impl Fn(&Product) -> bool,
    ) {
        if self.json {
            return;
        }
        let title_width = self.term_width().saturating_sub(40).clamp(20, 60);
        let row = |cells: [&str; 5]| {
            println!(
                "  {:1}  {:>4}  {:title_width$}  {:>12}  {:>6}",
                cells[0],
                cells[1],
                cells[2],
                cells[3],
                cells[4],
                title_width = title_width
            );
        };

        row(["", "ID", "TITLE", "PRICE", "RATING"]);
        for product in products {
            let id = product.id.to_string();
            let title = truncate_text(&product.title, title_width);
            let price = format_currency(product.price, currency);
            let rating = format_rating(product.rating.rate);
            let mark = if is_favorite(product) { "♥" } else { "" };
            row([mark, &id, &title, &price, &rating]);
        }
    }

    /// A steady-ticking spinner; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) =
            ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }
}

/// Colored label for a fetch status.
pub fn status_badge(status: FetchStatus) -> String {
    let label = style(status.as_str());
    match status {
        FetchStatus::Succeeded => label.green(),
        FetchStatus::Pending => label.yellow(),
        FetchStatus::Failed => label.red(),
        FetchStatus::Idle => label.dim(),
    }
    .to_string()
}
