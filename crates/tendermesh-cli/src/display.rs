//! Vertical card display for tenders, recommendations, and statistics.

use tendermesh_core::{Recommendation, Tender, TenderStats};

// ── Tender cards ──

pub fn print_tenders(tenders: &[Tender], limit: usize) {
    if tenders.is_empty() {
        println!("No tenders found.");
        return;
    }
    let show = tenders.len().min(limit);
    for tender in &tenders[..show] {
        print_tender_card(tender);
    }
    if tenders.len() > show {
        println!("... and {} more", tenders.len() - show);
    }
}

fn print_tender_card(tender: &Tender) {
    println!("=== {} ===", tender.id);
    println!("{}", tender.title);
    println!();
    println!("  {:<14} {} / {}", "location", tender.country, tender.region);
    println!("  {:<14} {}", "category", tender.category);
    match tender.budget {
        Some(budget) => println!("  {:<14} {}", "budget", format_budget(budget)),
        None => println!("  {:<14} undisclosed", "budget"),
    }
    println!(
        "  {:<14} {} ({})",
        "deadline",
        tender.deadline.format("%Y-%m-%d"),
        tender.time_left
    );
    println!("  {:<14} {:.2}", "score", tender.similarity);
    println!("  {:<14} {}", "bids", tender.bids_count);
    if !tender.requirements.is_empty() {
        println!("  {:<14} {}", "requirements", tender.requirements.join(", "));
    }
    println!("  {:<14} {}", "source", tender.source);
    println!();
}

// ── Recommendations ──

pub fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("No recommendations above the match threshold.");
        return;
    }
    for rec in recommendations {
        print_tender_card(&rec.tender);
        for reason in &rec.match_reasons {
            println!("    + {reason}");
        }
        if !rec.match_reasons.is_empty() {
            println!();
        }
    }
}

// ── Statistics ──

pub fn print_stats(stats: &TenderStats) {
    println!("=== Tender statistics ===");
    println!();
    println!("  {:<18} {}", "total", stats.total);
    println!("  {:<18} {}", "open", stats.open_count);
    println!("  {:<18} {}", "recent", stats.recent_count);
    println!("  {:<18} {}", "with budget", stats.with_budget);
    println!(
        "  {:<18} {}",
        "total budget",
        format_budget(stats.total_budget)
    );
    println!(
        "  {:<18} {}",
        "average budget",
        format_budget(stats.average_budget)
    );
    println!();

    println!("By country");
    let mut countries: Vec<(&String, &usize)> = stats.by_country.iter().collect();
    countries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (country, count) in countries {
        println!("  {country:<18} {count}");
    }
    println!();

    println!("Top categories");
    for (category, count) in &stats.top_categories {
        println!("  {category:<30} {count}");
    }
    println!();

    println!("Top regions");
    for (region, count) in &stats.top_regions {
        println!("  {region:<30} {count}");
    }
}

// ── Helpers ──

/// Compact budget display: 12.5M, 850K, 400.
fn format_budget(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("{:.0}K", amount / 1_000.0)
    } else {
        format!("{amount:.0}")
    }
}
