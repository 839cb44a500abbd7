use chrono::NaiveDateTime;

use super::investing_model::Fundable;

/// Marks a record as fully invested once its invested amount has reached its
/// required amount, stamping the close date. Idempotent, and the only place
/// in the crate that writes `close_date`.
pub fn settle<F: Fundable>(record: &mut F, now: NaiveDateTime) {
    if record.fully_invested() {
        return;
    }
    if record.invested_amount() == record.full_amount() {
        record.set_fully_invested(true);
        record.set_close_date(Some(now));
    }
}

/// Greedy FIFO allocation between a new record and the unsatisfied
/// counterpart pool.
///
/// `counterparts` must contain only records with remaining capacity, ordered
/// oldest first; that ordering is the fairness contract. The new record is
/// mutated in place, every counterpart that received or supplied money is
/// returned in processing order, and the untouched remainder is dropped
/// unchanged. Both sides of each transfer are settled with the same `now`, so
/// two records completed by one transfer share a close date.
///
/// Calling this on an already fully invested record is a defined no-op.
pub fn allocate<N, C>(new_record: &mut N, counterparts: Vec<C>, now: NaiveDateTime) -> Vec<C>
where
    N: Fundable,
    C: Fundable,
{
    if new_record.fully_invested() {
        return Vec::new();
    }

    let mut touched = Vec::with_capacity(counterparts.len());
    for mut counterpart in counterparts {
        let amount = counterpart.remaining().min(new_record.remaining());
        new_record.set_invested_amount(new_record.invested_amount() + amount);
        counterpart.set_invested_amount(counterpart.invested_amount() + amount);
        settle(new_record, now);
        settle(&mut counterpart, now);
        touched.push(counterpart);
        if new_record.fully_invested() {
            break;
        }
    }
    touched
}
