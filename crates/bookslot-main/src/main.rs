// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use bookslot_core::time::TimeDelta;
use bookslot_engine::planner::{SlotPlanner, SlotRequest};
use bookslot_engine::store::MemoryStore;
use bookslot_model::clock::clock_label;
use bookslot_model::scenario::{ScenarioConfigBuilder, ScenarioGenerator};
use bookslot_model::staff::GenderPreference;
use serde::Serialize;
use std::{fs::File, io::BufWriter, time::Instant};
use time::macros::date;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct SlotEntry {
    start: String,
    end: String,
    available: bool,
}

#[derive(Debug, Clone, Serialize)]
struct QueryReport {
    description: String,
    service: u64,
    duration_minutes: i64,
    preference: String,
    excluded_booking: Option<u64>,
    slots: Vec<SlotEntry>,
}

#[derive(Debug, Clone, Serialize)]
struct DayReport {
    description: String,
    date: String,
    seed: u64,
    employees: usize,
    bookings: usize,
    elapsed_ms: u128,
    queries: Vec<QueryReport>,
}

fn main() {
    enable_tracing();

    // Deterministic demo day
    const SEED: u64 = 42;

    let config = ScenarioConfigBuilder::new()
        .date(date!(2025 - 06 - 02))
        .employees(8)
        .services(4)
        .bookings(32)
        .seed(SEED)
        .build()
        .expect("valid scenario config");
    let mut generator = ScenarioGenerator::new(config);
    let scenario = generator.generate();
    scenario
        .schedule()
        .validate()
        .expect("generated schedule is valid");

    info!(
        employees = scenario.employees().len(),
        bookings = scenario.bookings().len(),
        services = scenario.services().len(),
        "Generated demo scenario"
    );

    let date = scenario.date();
    let service = scenario.services()[0];
    let duration = TimeDelta::new(45);
    let planner = SlotPlanner::new(MemoryStore::from_scenario(&scenario));

    let t0 = Instant::now();
    let mut queries: Vec<QueryReport> = Vec::new();

    // One query per staff preference
    for preference in [
        GenderPreference::NoPreference,
        GenderPreference::Female,
        GenderPreference::Male,
    ] {
        let request = SlotRequest::new(service, duration).with_preference(preference);
        let found = planner
            .available_slots(date, &request)
            .expect("in-memory store never fails");
        queries.push(QueryReport {
            description: format!("45 minute visit, preference = {}", preference),
            service: service.value(),
            duration_minutes: duration.value(),
            preference: preference.to_string(),
            excluded_booking: None,
            slots: found
                .iter()
                .map(|s| SlotEntry {
                    start: s.start_label(),
                    end: s.end_label(),
                    available: true,
                })
                .collect(),
        });
    }

    // Reschedule an assigned booking: its own time must not block it
    if let Some(own) = scenario
        .bookings()
        .iter()
        .find(|b| b.is_active() && b.employee().is_some())
    {
        let request = SlotRequest::new(service, own.duration()).excluding(own.id());
        let found = planner
            .available_slots(date, &request)
            .expect("in-memory store never fails");
        queries.push(QueryReport {
            description: format!(
                "reschedule {} away from {}",
                own.id(),
                clock_label(own.start())
            ),
            service: service.value(),
            duration_minutes: own.duration().value(),
            preference: GenderPreference::NoPreference.to_string(),
            excluded_booking: Some(own.id().value()),
            slots: found
                .iter()
                .map(|s| SlotEntry {
                    start: s.start_label(),
                    end: s.end_label(),
                    available: true,
                })
                .collect(),
        });
    }

    let elapsed = t0.elapsed();

    // Survey, confirmation gate, and assignment pick for the console
    let survey_request = SlotRequest::new(service, duration);
    let surveyed = planner
        .survey(date, &survey_request)
        .expect("in-memory store never fails");

    println!();
    println!("=================================================================");
    println!("========================= Bookslot Demo =========================");
    println!("=================================================================");
    println!();
    println!("Date: {} ({})", date, date.weekday());
    println!();
    println!("{:<48} {:>6}", "query", "slots");
    for query in &queries {
        println!("{:<48} {:>6}", query.description, query.slots.len());
    }
    println!();
    println!("Candidate survey for preference = no_preference:");
    for entry in &surveyed {
        println!("  {}  {}", entry.slot(), entry.outcome());
    }
    println!();

    if let Some(head) = planner
        .first_available(date, &survey_request)
        .expect("in-memory store never fails")
    {
        let outcome = planner
            .verify(date, head.start(), &survey_request)
            .expect("in-memory store never fails");
        println!("Confirmation gate for {}: {}", head, outcome);

        let staff = planner
            .available_staff(date, head.start(), &survey_request)
            .expect("in-memory store never fails");
        if let Some(pick) = staff.first() {
            println!("Assignment pick for {}: {}", head, pick.id());
        }
    } else {
        println!("No bookable slot left on {}", date);
    }

    // Serialize to JSON
    let report = DayReport {
        description: "Bookslot demo: slot queries over a generated salon day.".into(),
        date: date.to_string(),
        seed: SEED,
        employees: scenario.employees().len(),
        bookings: scenario.bookings().len(),
        elapsed_ms: elapsed.as_millis(),
        queries,
    };

    let file = File::create("slot_report.json").expect("create slot_report.json");
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report).expect("write json report");

    println!();
    println!("Wrote: slot_report.json");
}
