use crate::model::{Category, FeedbackRecord, FeedbackStatus, NewFeedback};
use crate::random::RandomSource;
use crate::tx_hash;

const DAY_MS: i64 = 86_400_000;

struct SeedEntry {
    id: &'static str,
    category: Category,
    title: &'static str,
    message: &'static str,
    age_days: i64,
    votes: u32,
    status: FeedbackStatus,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        id: "fb-001",
        category: Category::Infrastructure,
        title: "Library Wi-Fi constantly drops during peak hours",
        message: "The Wi-Fi in the main library building drops connection every 15-20 minutes during peak hours (10am-4pm). This severely affects students trying to do online research or attend virtual classes. The IT department should upgrade the access points or add more bandwidth capacity.",
        age_days: 2,
        votes: 47,
        status: FeedbackStatus::Reviewed,
    },
    SeedEntry {
        id: "fb-002",
        category: Category::Academics,
        title: "Need more lab hours for CS department",
        message: "The computer science labs close at 6pm which is way too early. Many students have classes until 5pm and barely get any lab time. Extending hours to 10pm would greatly benefit students working on projects and assignments.",
        age_days: 1,
        votes: 32,
        status: FeedbackStatus::Pending,
    },
    SeedEntry {
        id: "fb-003",
        category: Category::CampusLife,
        title: "Cafeteria food quality has declined significantly",
        message: "Over the past semester, the quality and variety of food in the main cafeteria has noticeably declined. The portions are smaller, prices have increased, and there are fewer healthy options available. Students deserve better nutrition options on campus.",
        age_days: 3,
        votes: 89,
        status: FeedbackStatus::Resolved,
    },
    SeedEntry {
        id: "fb-004",
        category: Category::Safety,
        title: "Poor lighting near the south parking lot",
        message: "The walkway between the south parking lot and the engineering building has very poor lighting. Several students have reported feeling unsafe walking there after evening classes. Additional street lights or emergency call stations would improve safety.",
        age_days: 5,
        votes: 63,
        status: FeedbackStatus::Pending,
    },
    SeedEntry {
        id: "fb-005",
        category: Category::Administration,
        title: "Registration system crashes during enrollment",
        message: "Every semester, the online course registration system crashes or becomes extremely slow during the enrollment window. This causes students to miss out on required courses. The system needs a serious infrastructure upgrade to handle concurrent users.",
        age_days: 4,
        votes: 71,
        status: FeedbackStatus::Reviewed,
    },
];

/// The sample records a fresh board starts with, aged relative to `now_ms`.
pub fn records(rng: &mut dyn RandomSource, now_ms: i64) -> Vec<FeedbackRecord> {
    SEED.iter()
        .map(|entry| {
            FeedbackRecord::new(
                entry.id.to_string(),
                NewFeedback {
                    category: entry.category,
                    title: entry.title.to_string(),
                    message: entry.message.to_string(),
                },
                now_ms - entry.age_days * DAY_MS,
                tx_hash::fabricate(rng),
                entry.votes,
                entry.status,
            )
        })
        .collect()
}
