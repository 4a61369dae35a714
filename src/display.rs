//! Colored terminal output for the CLI.
//!
//! Each reply kind gets its own tag and color; fit results are colored by
//! tier.

use std::io::{self, Write};

use chrono::Local;
use owo_colors::OwoColorize;

use crate::chat::{project_details, project_summary, Reply};
use crate::fit::{FitReport, FitTier};
use crate::knowledge::{AboutSection, ProjectEntry};

/// Width of the score bar in cells.
const BAR_WIDTH: usize = 20;

/// Current local time for transcript lines.
fn timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Truncate a string to a maximum number of characters, adding an ellipsis
/// if truncated.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        "...".to_string()
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    }
}

/// A fixed-width bar for a 0-100 score.
#[must_use]
pub fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Tag shown next to a fit report.
#[must_use]
pub fn tier_tag(tier: FitTier) -> &'static str {
    match tier {
        FitTier::Excellent => "[EXCELLENT]",
        FitTier::Good => "[GOOD]",
        FitTier::Partial => "[PARTIAL]",
        FitTier::Low => "[LOW]",
    }
}

fn bot_line(tag: &str, text: &str) {
    println!("{} {} {}", timestamp().dimmed(), tag, text);
}

/// Print the REPL banner.
pub fn print_banner(name: &str, ai_enabled: bool) {
    println!(
        "{} {}",
        format!("{name}Bot").cyan().bold(),
        if ai_enabled {
            "(AI fallback on)".green().to_string()
        } else {
            "(local mode)".yellow().to_string()
        }
    );
    println!(
        "{}",
        "Commands: /fit /projects /about /help /reset /quit".dimmed()
    );
    let _ = io::stdout().flush();
}

/// Print the input prompt without a newline.
pub fn print_prompt() {
    print!("{} ", ">".cyan().bold());
    let _ = io::stdout().flush();
}

/// Print a bot reply.
pub fn print_reply(reply: &Reply) {
    match reply {
        Reply::Answer { text, .. } => bot_line(&"[ANSWER]".green().bold().to_string(), text),
        Reply::Generated { text } => bot_line(&"[AI]".magenta().bold().to_string(), text),
        Reply::Guidance { text } => bot_line(&"[HELP]".blue().bold().to_string(), text),
        Reply::OutOfScope { text } => bot_line(&"[SCOPE]".yellow().bold().to_string(), text),
        Reply::Welcome { text } | Reply::FitPrompt { text } => {
            bot_line(&"[BOT]".cyan().bold().to_string(), text);
        }
        Reply::Project { project } => print_project(project),
        Reply::Projects { heading, projects } => {
            bot_line(&"[PROJECTS]".cyan().bold().to_string(), heading);
            print_project_list(projects);
        }
        Reply::Fit { report } => print_fit_report(report),
        Reply::About { section } => print_about(section),
    }
    let _ = io::stdout().flush();
}

/// Print one project in full.
pub fn print_project(project: &ProjectEntry) {
    bot_line(&"[PROJECT]".cyan().bold().to_string(), "I found a relevant project!");
    println!("{}", project_details(project));
    let _ = io::stdout().flush();
}

/// Print a list of project summaries.
pub fn print_project_list(projects: &[ProjectEntry]) {
    for project in projects {
        let summary = project_summary(project);
        let mut lines = summary.lines();
        if let Some(title) = lines.next() {
            println!("  {} {}", "•".cyan(), title.bold());
        }
        for line in lines {
            println!("    {}", truncate(line, 120).dimmed());
        }
    }
    let _ = io::stdout().flush();
}

/// Print a fit report, colored by tier.
pub fn print_fit_report(report: &FitReport) {
    let tag = tier_tag(report.tier);
    let headline = format!("{} {}%", report.title, report.score);
    let bar = score_bar(report.score);
    let (tag, headline, bar) = match report.tier {
        FitTier::Excellent => (
            tag.green().bold().to_string(),
            headline.green().bold().to_string(),
            bar.green().to_string(),
        ),
        FitTier::Good => (
            tag.cyan().bold().to_string(),
            headline.cyan().bold().to_string(),
            bar.cyan().to_string(),
        ),
        FitTier::Partial => (
            tag.yellow().bold().to_string(),
            headline.yellow().bold().to_string(),
            bar.yellow().to_string(),
        ),
        FitTier::Low => (
            tag.red().bold().to_string(),
            headline.red().bold().to_string(),
            bar.red().to_string(),
        ),
    };

    bot_line(&tag, &headline);
    println!("  {bar}");
    println!("  {}", report.subtitle.italic());
    println!();
    println!("{}", report.summary);
    if !report.matched_skills.is_empty() {
        println!();
        println!(
            "{} {}",
            "Strengths:".bold(),
            report.matched_skills.join(", ")
        );
    }
    if let Some(note) = &report.note {
        println!();
        println!("{}", note.dimmed());
    }
    if let Some(rule) = &report.matched_rule {
        println!("{}", format!("(matched role: {rule})").dimmed());
    }
    let _ = io::stdout().flush();
}

/// Print the "About" card.
pub fn print_about(section: &AboutSection) {
    bot_line(&"[ABOUT]".cyan().bold().to_string(), &section.title.bold().to_string());
    for paragraph in &section.paragraphs {
        println!();
        println!("{paragraph}");
    }
    let _ = io::stdout().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_very_short_max() {
        assert_eq!(truncate("hello", 3), "...");
        assert_eq!(truncate("hello", 0), "...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("diseño de producto", 8), "diseñ...");
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(0), "░".repeat(BAR_WIDTH));
        assert_eq!(score_bar(50).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(score_bar(97).chars().filter(|c| *c == '█').count(), 19);
        assert_eq!(score_bar(100).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_tier_tag() {
        assert_eq!(tier_tag(FitTier::Excellent), "[EXCELLENT]");
        assert_eq!(tier_tag(FitTier::Low), "[LOW]");
    }
}
