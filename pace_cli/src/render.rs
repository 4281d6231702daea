//! Text and JSON rendering of calculator results.

use pace_core::calculations::heart_rate::HrMethod;
use pace_core::calculations::CalculationResult;
use pace_core::time_format::format_pace;
use pace_core::{CalcResult, StatsSummary};

const RULE: &str = "═══════════════════════════════════════";

pub fn print_result(result: &CalculationResult, json: bool) -> CalcResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", RULE);
    match result {
        CalculationResult::Vdot(r) => {
            println!("  Your VDOT: {}", r.display_score());
            println!("{}", RULE);
            for zp in &r.training_paces {
                let label = format!("{}:", zp.zone.display_name());
                println!("  {:<11} {} per km", label, zp.range.format());
            }
        }
        CalculationResult::Pace(r) => {
            println!("  PACE ANALYSIS");
            println!("{}", RULE);
            println!("  Pace:   {} per {}", r.pace, r.unit);
            println!("  Speed:  {:.2} km/h ({:.2} mph)", r.speed_kmh, r.speed_mph);
            println!("  Also:   {} per {}", r.other_pace, r.other_unit);
        }
        CalculationResult::Splits(r) => {
            println!("  RACE SPLITS ({} per km)", format_pace(r.pace_s_per_km));
            println!("{}", RULE);
            for split in &r.splits {
                println!("  {:>8} km  {:>8}", split.distance_km, split.time);
            }
            println!();
            println!("  Total Time: {}", r.total_time);
        }
        CalculationResult::HeartRateZones(r) => {
            let method = match r.method {
                HrMethod::Karvonen => "Karvonen",
                HrMethod::PercentOfMax => "% of max",
            };
            println!("  TRAINING ZONES ({})", method);
            println!("{}", RULE);
            for zone in &r.zones {
                println!(
                    "  {:<20} {:>3} - {:>3} bpm  {}",
                    zone.name, zone.min_bpm, zone.max_bpm, zone.description
                );
            }
        }
        CalculationResult::RacePredictor(r) => {
            println!("  PREDICTED RACE TIMES");
            println!("{}", RULE);
            for prediction in &r.predictions {
                println!("  {:<14} {:>8}", format!("{}:", prediction.name), prediction.time);
            }
        }
        CalculationResult::Calories(r) => {
            println!("  CALORIE BURN ESTIMATE");
            println!("{}", RULE);
            println!("  Speed:               {:.1} km/h", r.speed_kmh);
            println!("  MET-based estimate:  {:.0} calories", r.met_calories);
            println!("  Simple estimate:     {:.0} calories", r.simple_calories);
            println!("  Average:             {} calories", r.average_calories);
        }
    }
    println!("{}", RULE);
    Ok(())
}

pub fn print_stats_bar(summary: &StatsSummary) {
    println!(
        "  Calculations: {}  |  Pace: {}  |  VDOT: {}  |  Calories: {}",
        summary.calculations, summary.last_pace, summary.last_vdot, summary.total_calories
    );
}

pub fn print_stats(summary: &StatsSummary, json: bool) -> CalcResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    println!("{}", RULE);
    println!("  USAGE STATS");
    println!("{}", RULE);
    println!("  Calculations:        {}", summary.calculations);
    println!("  Last pace:           {}", summary.last_pace);
    println!("  Last VDOT:           {}", summary.last_vdot);
    println!("  Calories burned:     {}", summary.total_calories);
    println!("  Favourite:           {}", summary.favorite_calculator);
    println!("{}", RULE);
    Ok(())
}
