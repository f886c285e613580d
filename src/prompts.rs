use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterEntry {
    pub rider_id: &'static str,
    pub rating: f64,
    pub note: Option<&'static str>,
}

/// Fixed fixture, not read from the rider table.
pub const RIDER_ROSTER: [RosterEntry; 5] = [
    RosterEntry {
        rider_id: "RIDER-101",
        rating: 4.9,
        note: None,
    },
    RosterEntry {
        rider_id: "RIDER-102",
        rating: 4.1,
        note: Some("closer to pickup"),
    },
    RosterEntry {
        rider_id: "RIDER-103",
        rating: 4.5,
        note: None,
    },
    RosterEntry {
        rider_id: "RIDER-104",
        rating: 3.5,
        note: None,
    },
    RosterEntry {
        rider_id: "RIDER-105",
        rating: 5.0,
        note: Some("furthest away"),
    },
];

const DISPATCHER_ROLE: &str = "You are an expert Logistics Dispatcher for Vengers Express. \
Your task is to provide a clear, concise command to the delivery rider.";

pub const CUSTOMER_UNREACHABLE_RULE: &str = "**If the problem is 'Customer is not answering the phone/door':** \
Command the rider to deliver the parcel to a designated alternate address \
(e.g., neighbor's unit, security desk) and capture a photo as proof.";

pub const VEHICLE_BREAKDOWN_RULE: &str = "**If the problem is 'Vehicle breakdown/Accident':** \
Command the rider to securely log their location and wait for a support vehicle, \
and state that the ride will be reassigned immediately.";

pub fn build_reroute_prompt(awb: &str, current_rider: &str, destination: &str, problem: &str) -> String {
    format!(
        "{DISPATCHER_ROLE}\n\
         \n\
         **Context:**\n\
         - AWB: {awb}\n\
         - Current Rider ID: {current_rider}\n\
         - Delivery Location: {destination}\n\
         - **Problem:** {problem}\n\
         \n\
         **TASK:** Provide only the command text. Do not use conversational language. \
         The command must be actionable for the rider.\n\
         \n\
         {CUSTOMER_UNREACHABLE_RULE}\n\
         \n\
         {VEHICLE_BREAKDOWN_RULE}\n"
    )
}

pub fn build_reassignment_prompt(awb: &str, pickup: &str, delivery: &str) -> String {
    format!(
        "A ride with AWB {awb} from {pickup} to {delivery} has been pending assignment.\n\
         There are {count} available riders: {roster}.\n\
         \n\
         **TASK:** Based on standard logistics efficiency (prioritizing proximity and rating), \
         suggest the single best Rider ID to assign this ride to.\n\
         \n\
         **OUTPUT FORMAT:** Provide ONLY the Rider ID (e.g., RIDER-102).\n",
        count = RIDER_ROSTER.len(),
        roster = describe_roster(&RIDER_ROSTER),
    )
}

fn describe_roster(roster: &[RosterEntry]) -> String {
    let mut out = String::new();
    for (idx, entry) in roster.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} (Rating {:.1}", entry.rider_id, entry.rating);
        if let Some(note) = entry.note {
            let _ = write!(out, ", {note}");
        }
        out.push(')');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reroute_prompt_embeds_inputs_and_both_rules() {
        let prompt = build_reroute_prompt(
            "AWB-12345678",
            "UNASSIGNED",
            "12 Main St",
            "Customer is not answering the phone/door",
        );

        assert!(prompt.contains("AWB-12345678"));
        assert!(prompt.contains("UNASSIGNED"));
        assert!(prompt.contains("12 Main St"));
        assert!(prompt.contains("Customer is not answering the phone/door"));
        assert!(prompt.contains("designated alternate address"));
        assert!(prompt.contains("capture a photo as proof"));
        assert!(prompt.contains("ride will be reassigned immediately"));
    }

    #[test]
    fn reroute_prompt_is_deterministic() {
        let a = build_reroute_prompt("AWB-1", "RIDER-7", "Dock 4", "flat tyre");
        let b = build_reroute_prompt("AWB-1", "RIDER-7", "Dock 4", "flat tyre");
        assert_eq!(a, b);
    }

    #[test]
    fn reassignment_prompt_is_deterministic() {
        let a = build_reassignment_prompt("AWB-1", "1 Depot Rd", "12 Main St");
        let b = build_reassignment_prompt("AWB-1", "1 Depot Rd", "12 Main St");
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn empty_inputs_still_produce_a_prompt() {
        assert!(!build_reroute_prompt("", "", "", "").is_empty());
        assert!(!build_reassignment_prompt("", "", "").is_empty());
    }

    #[test]
    fn reassignment_prompt_lists_fixed_roster() {
        let prompt = build_reassignment_prompt("AWB-abcdef01", "1 Depot Rd", "12 Main St");

        assert!(prompt.contains("AWB AWB-abcdef01 from 1 Depot Rd to 12 Main St"));
        assert!(prompt.contains("There are 5 available riders"));
        assert!(prompt.contains("RIDER-102 (Rating 4.1, closer to pickup)"));
        assert!(prompt.contains("RIDER-105 (Rating 5.0, furthest away)"));
        assert!(prompt.contains("Provide ONLY the Rider ID"));
    }
}
