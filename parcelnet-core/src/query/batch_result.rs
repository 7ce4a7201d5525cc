use crate::{
    model::{NearestMatch, ParcelId},
    NearestError,
};

/// a parcel excluded from the results along with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFailure {
    pub parcel_id: ParcelId,
    pub error: NearestError,
}

/// matches and failures of a batch, each in the order the parcels were submitted
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub matches: Vec<NearestMatch>,
    pub failures: Vec<QueryFailure>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.matches.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn extend(&mut self, other: BatchResult) {
        self.matches.extend(other.matches);
        self.failures.extend(other.failures);
    }
}
