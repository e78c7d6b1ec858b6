mod helpers;

use chrono_tz::Tz;
use lifetime_value_aggregator_logic::{test_utils, Aggregator};

#[tokio::test]
#[ignore = "Needs database to run"]
async fn only_the_latest_observation_per_account_counts() {
    let db = helpers::init_db("latest_observation").await;
    let channel =
        test_utils::insert_channel(&*db, "magento", test_utils::utc("2025-03-01T00:00:00Z"))
            .await
            .unwrap();

    // account 1 is observed twice within March; only the 20.0 counts
    test_utils::insert_history(&*db, channel.id, 1, 10.0, test_utils::utc("2025-03-01T12:00:00Z"))
        .await
        .unwrap();
    test_utils::insert_history(&*db, channel.id, 1, 20.0, test_utils::utc("2025-03-15T12:00:00Z"))
        .await
        .unwrap();
    test_utils::insert_history(&*db, channel.id, 2, 30.0, test_utils::utc("2025-03-20T12:00:00Z"))
        .await
        .unwrap();
    // April observation, outside the March window
    test_utils::insert_history(&*db, channel.id, 2, 40.0, test_utils::utc("2025-04-02T12:00:00Z"))
        .await
        .unwrap();

    Aggregator::new(db.clone())
        .aggregate_at(Tz::UTC, true, test_utils::utc("2025-04-10T00:00:00Z"))
        .await
        .unwrap();

    let records = test_utils::list_aggregations(&*db).await.unwrap();
    assert_eq!(records.len(), 2);

    // March: (20 + 30) / 2
    assert_eq!((records[0].year, records[0].month), (2025, 3));
    assert_eq!(records[0].amount, Some(25.0));

    // April sees the newer observation for account 2
    assert_eq!((records[1].year, records[1].month), (2025, 4));
    assert_eq!(records[1].amount, Some(30.0));
}
