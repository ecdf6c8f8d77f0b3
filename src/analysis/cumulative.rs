//! Forward and inverse cumulative sums over confidence buckets

use super::histogram::{BucketedTable, TableKind, BUCKET_COUNT};
use super::outcome::CategoryCounts;

/// Row k holds the records with confidence below the upper bound of bucket k
pub fn forward_cumulative(histogram: &BucketedTable) -> BucketedTable {
    let buckets = histogram.bucket_counts();
    let mut sums = [CategoryCounts::default(); BUCKET_COUNT];
    let mut running = CategoryCounts::default();
    for (sum, bucket) in sums.iter_mut().zip(buckets.iter()) {
        running += *bucket;
        *sum = running;
    }
    BucketedTable::from_buckets(histogram.axis, TableKind::ForwardCumulative, &sums, running)
}

/// Row k holds the records at or above the lower bound of bucket k
pub fn inverse_cumulative(histogram: &BucketedTable) -> BucketedTable {
    let buckets = histogram.bucket_counts();
    let mut sums = [CategoryCounts::default(); BUCKET_COUNT];
    let mut running = CategoryCounts::default();
    for (sum, bucket) in sums.iter_mut().zip(buckets.iter()).rev() {
        running += *bucket;
        *sum = running;
    }
    BucketedTable::from_buckets(histogram.axis, TableKind::InverseCumulative, &sums, running)
}
