use entity::{submissions, SubmissionStatus};
use sea_orm::prelude::DateTimeUtc;
use std::{cmp::Reverse, collections::HashMap};

/// Something that can compete for the best submission of a (user, question) pair.
pub trait Ranked {
    fn pair(&self) -> (i32, i32);
    fn status(&self) -> SubmissionStatus;
    fn submitted_at(&self) -> DateTimeUtc;
}

impl Ranked for submissions::Model {
    fn pair(&self) -> (i32, i32) {
        (self.user_id, self.question_id)
    }

    fn status(&self) -> SubmissionStatus {
        self.status
    }

    fn submitted_at(&self) -> DateTimeUtc {
        self.submitted_at
    }
}

fn rank<R: Ranked>(item: &R) -> (u8, Reverse<DateTimeUtc>) {
    (item.status().priority(), Reverse(item.submitted_at()))
}

/// The best submission of each pair: lowest status priority first, then the most recent.
///
/// Pairs keep the order in which they first appear in `items`.
pub fn best_per_pair<R: Ranked>(items: impl IntoIterator<Item = R>) -> Vec<R> {
    let mut winners: Vec<R> = Vec::new();
    let mut index: HashMap<(i32, i32), usize> = HashMap::new();

    for item in items {
        match index.get(&item.pair()) {
            Some(&i) => {
                if rank(&item) < rank(&winners[i]) {
                    winners[i] = item;
                }
            }
            None => {
                index.insert(item.pair(), winners.len());
                winners.push(item);
            }
        }
    }

    winners
}

/// Best of submissions that all belong to the same pair.
pub fn best<R: Ranked>(items: impl IntoIterator<Item = R>) -> Option<R> {
    items.into_iter().min_by_key(rank)
}
