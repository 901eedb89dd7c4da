//! Property tests for the statistics aggregator
//!
//! These tests verify, over arbitrary ticket collections:
//! - Determinism: summarizing the same tickets twice gives the same summary
//! - Histogram totals: every ticket lands in exactly one hour
//! - Bounds: probabilities stay within the cap, averages within the data
//! - Order independence for counts

use proptest::prelude::*;
use ticketdesk::analytics::{
    average_resolution_minutes, category_frequency, hourly_activity, predicted_peak_hours,
    PeakHourModel, ReportingZone, TicketAnalyzer, HOURS_PER_DAY,
};
use ticketdesk::testing::fixtures::TicketBuilder;
use ticketdesk::tickets::{Priority, Status, Ticket};

const CATEGORIES: [&str; 4] = ["Database", "Network", "Security", "Email"];

prop_compose! {
    fn arb_ticket()(
        id in 1u32..10_000,
        hour in 0u32..24,
        category in 0usize..CATEGORIES.len(),
        priority in 0usize..4,
        resolved_minutes in proptest::option::of(1i64..600),
        attempts in proptest::collection::vec((0usize..3, any::<bool>()), 0..4),
    ) -> Ticket {
        let priority = [Priority::Low, Priority::Medium, Priority::High, Priority::Critical][priority];
        let mut builder = TicketBuilder::new(id.to_string())
            .with_category(CATEGORIES[category])
            .with_priority(priority)
            .with_problem("Recurring outage")
            .created_at_hour(hour);

        for (fix, successful) in attempts {
            builder = builder.with_attempt(["Restart service", "Clear cache", "Rotate keys"][fix], successful);
        }

        match resolved_minutes {
            Some(minutes) => builder.resolved(minutes).with_final_solution("Restart service").build(),
            None => builder.with_status(Status::Open).build(),
        }
    }
}

fn arb_tickets() -> impl Strategy<Value = Vec<Ticket>> {
    proptest::collection::vec(arb_ticket(), 0..60)
}

proptest! {
    #[test]
    fn prop_histogram_counts_every_ticket(tickets in arb_tickets()) {
        let activity = hourly_activity(&tickets, ReportingZone::utc());

        prop_assert_eq!(activity.len(), HOURS_PER_DAY);
        for (index, entry) in activity.iter().enumerate() {
            prop_assert_eq!(entry.hour as usize, index);
        }
        let total: u64 = activity.iter().map(|entry| entry.count).sum();
        prop_assert_eq!(total, tickets.len() as u64);
    }

    #[test]
    fn prop_peak_probabilities_are_bounded_and_sorted(tickets in arb_tickets()) {
        let model = PeakHourModel::default();
        let activity = hourly_activity(&tickets, ReportingZone::utc());
        let peaks = predicted_peak_hours(&activity, tickets.len() as u64, &model);

        prop_assert_eq!(peaks.len(), HOURS_PER_DAY);
        for peak in &peaks {
            prop_assert!(peak.probability >= 0.0);
            prop_assert!(peak.probability <= model.cap);
        }
        for pair in peaks.windows(2) {
            prop_assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn prop_summary_is_deterministic(tickets in arb_tickets()) {
        let analyzer = TicketAnalyzer::new().with_zone(ReportingZone::utc());
        prop_assert_eq!(analyzer.summarize(&tickets), analyzer.summarize(&tickets));
    }

    #[test]
    fn prop_average_within_resolved_range(tickets in arb_tickets()) {
        let minutes: Vec<i64> = tickets.iter().filter_map(Ticket::resolution_minutes).collect();
        let average = average_resolution_minutes(&tickets);

        match (minutes.iter().min(), minutes.iter().max()) {
            (Some(&low), Some(&high)) => {
                prop_assert!(average >= low);
                prop_assert!(average <= high);
            }
            _ => prop_assert_eq!(average, 0),
        }
    }

    #[test]
    fn prop_category_counts_ignore_order(tickets in arb_tickets()) {
        let mut reversed = tickets.clone();
        reversed.reverse();

        let mut forward = category_frequency(&tickets, CATEGORIES.len());
        let mut backward = category_frequency(&reversed, CATEGORIES.len());
        forward.sort_by(|a, b| a.category.cmp(&b.category));
        backward.sort_by(|a, b| a.category.cmp(&b.category));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_success_rates_are_fractions(tickets in arb_tickets()) {
        let summary = TicketAnalyzer::new().summarize(&tickets);
        for group in &summary.common_solutions {
            prop_assert!(!group.solutions.is_empty());
            for rate in &group.solutions {
                prop_assert!((0.0..=1.0).contains(&rate.success_rate));
            }
        }
    }
}
