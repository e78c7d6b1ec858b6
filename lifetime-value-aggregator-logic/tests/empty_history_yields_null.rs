mod helpers;

use chrono_tz::Tz;
use lifetime_value_aggregator_logic::{test_utils, Aggregator};

#[tokio::test]
#[ignore = "Needs database to run"]
async fn channel_without_history_stores_null_not_zero() {
    let db = helpers::init_db("empty_history").await;
    test_utils::insert_channel(&*db, "dormant", test_utils::utc("2025-05-02T00:00:00Z"))
        .await
        .unwrap();

    Aggregator::new(db.clone())
        .aggregate_at(Tz::UTC, false, test_utils::utc("2025-05-20T00:00:00Z"))
        .await
        .unwrap();

    let records = test_utils::list_aggregations(&*db).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!((records[0].year, records[0].month), (2025, 5));
    assert_eq!(records[0].amount, None);
}
