mod helpers;

use chrono_tz::Tz;
use lifetime_value_aggregator_logic::{repository::aggregations, test_utils, Aggregator};

#[tokio::test]
#[ignore = "Needs database to run"]
async fn both_clear_strategies_empty_the_table() {
    let db = helpers::init_db("clear_table_data").await;
    test_utils::insert_channel(&*db, "first", test_utils::utc("2025-01-10T00:00:00Z"))
        .await
        .unwrap();

    let aggregator = Aggregator::new(db.clone());
    let now = test_utils::utc("2025-04-01T00:00:00Z");
    let start = test_utils::utc("2025-01-01T00:00:00Z");

    aggregator.aggregate_at(Tz::UTC, true, now).await.unwrap();
    assert!(test_utils::count_aggregations(&*db).await.unwrap() > 0);

    aggregations::clear_table_data(&*db, true).await.unwrap();
    let points = aggregations::find_for_period(&*db, start, None, None)
        .await
        .unwrap();
    assert!(points.is_empty());

    aggregator.aggregate_at(Tz::UTC, true, now).await.unwrap();
    assert!(test_utils::count_aggregations(&*db).await.unwrap() > 0);

    aggregations::clear_table_data(&*db, false).await.unwrap();
    let points = aggregations::find_for_period(&*db, start, None, None)
        .await
        .unwrap();
    assert!(points.is_empty());
}
