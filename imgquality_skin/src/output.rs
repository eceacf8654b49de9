//! Human-readable rendering of validation results and batch summaries.

use console::style;
use skin_quality::batch::BatchResult;
use skin_quality::{quality_feedback, QualityVerdict, QuickValidationResult, ValidationResult};
use std::path::Path;
use std::time::Duration;

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs >= 60.0 {
        let whole = duration.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    } else {
        format!("{:.2}s", secs)
    }
}

fn verdict_label(verdict: QualityVerdict) -> String {
    match verdict {
        QualityVerdict::Accepted => style("✅ ACCEPTED").green().bold().to_string(),
        QualityVerdict::Warning => style("⚠️  WARNING").yellow().bold().to_string(),
        QualityVerdict::Rejected => style("❌ REJECTED").red().bold().to_string(),
    }
}

pub fn print_validation_human(path: &Path, result: &ValidationResult) {
    let m = &result.metrics;
    println!("📷 {}", style(path.display()).cyan().bold());
    println!(
        "   Verdict:    {}  (score {:.1}/100, {})",
        verdict_label(result.verdict()),
        result.score,
        result.grade().description()
    );
    println!(
        "   Resolution: {}x{} ({:.2} MP)",
        m.resolution.width, m.resolution.height, m.resolution.megapixels
    );
    println!("   Aspect:     {:.2}:1", m.aspect_ratio.ratio);
    println!(
        "   Lighting:   {:.1} ({})",
        m.lighting.brightness,
        if m.lighting.is_well_lit {
            "well lit"
        } else {
            "out of range"
        }
    );
    println!(
        "   Sharpness:  {:.1} ({})",
        m.sharpness.laplacian_variance,
        if m.sharpness.is_sharp { "sharp" } else { "blurry" }
    );
    match &m.face_detection {
        Some(face) if face.face_detected => {
            println!("   Face:       detected, {:.1}% of frame", face.face_size * 100.0)
        }
        Some(face) => println!(
            "   Face:       not detected ({:.1}% skin coverage)",
            face.face_size * 100.0
        ),
        None => println!("   Face:       not checked"),
    }

    for issue in &result.issues {
        println!("   {} {}", style("❌").red(), issue);
    }
    for warning in &result.warnings {
        println!("   {} {}", style("⚠️").yellow(), warning);
    }
    println!("   💬 {}", quality_feedback(result).replace('\n', "\n      "));
}

pub fn print_quick_human(path: &Path, result: &QuickValidationResult) {
    if result.is_valid {
        println!("{} {}", style("✅").green(), path.display());
    } else {
        println!(
            "{} {} - {}",
            style("❌").red(),
            path.display(),
            result.reason.as_deref().unwrap_or("rejected")
        );
    }
}

pub fn print_summary_report(result: &BatchResult, duration: Duration, operation_name: &str) {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  📊 {:<53}║", format!("{} Summary Report", operation_name));
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  📁 Files Processed:   {:>10}                        ║", result.total);
    println!("║  ✅ Accepted:          {:>10}                        ║", result.accepted);
    println!("║  ⚠️  With Warnings:     {:>10}                        ║", result.warned);
    println!("║  ❌ Rejected:          {:>10}                        ║", result.rejected);
    println!("║  💥 Failed to Read:    {:>10}                        ║", result.failed);
    println!("║  📈 Pass Rate:         {:>9.1}%                        ║", result.success_rate());
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  ⏱️  Total Time:        {:>10}                        ║", format_duration(duration));
    println!("╚══════════════════════════════════════════════════════════╝");

    if !result.errors.is_empty() {
        println!();
        println!("❌ Errors encountered:");
        for (path, error) in &result.errors {
            println!("   {} - {}", path.display(), error);
        }
    }
}
