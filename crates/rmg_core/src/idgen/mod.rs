use rand::Rng;
use time::OffsetDateTime;

use crate::domain::IncidentId;

/// Generate a fresh incident identifier: `RMG` + five random decimal digits
/// + the current UTC calendar year.
///
/// Called exactly once per creation attempt, immediately before submission,
/// so a retried attempt never reuses a stale identifier. Generation cannot
/// fail, and it does not guarantee uniqueness (roughly 1 in 90000 odds of a
/// collision per year-bucket); the repository rejects duplicates with
/// `DUPLICATE_INCIDENT_ID` and the store regenerates once.
pub fn generate() -> IncidentId {
    let mut rng = rand::rng();
    let digits: u32 = rng.random_range(10_000..100_000);
    let year = OffsetDateTime::now_utc().year();
    IncidentId::new(format!("RMG{digits}{year}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_well_formed() {
        for _ in 0..256 {
            let id = generate();
            assert!(id.is_well_formed(), "malformed id: {id}");
        }
    }

    #[test]
    fn generated_ids_carry_the_current_year() {
        let year = OffsetDateTime::now_utc().year().to_string();
        let id = generate();
        assert!(id.as_str().ends_with(&year), "unexpected year in {id}");
    }
}
