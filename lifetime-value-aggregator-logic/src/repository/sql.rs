/// Mean over each account's most recent lifetime-value observation before
/// the period end. The self-join keeps the whole computation inside the
/// database; history tables can be large.
///
/// `avg` over zero qualifying rows yields SQL NULL, which is the "no data"
/// result, never zero.
pub const AVG_LATEST_LIFETIME_VALUE: &str = r#"
select avg(h.amount) as amount
from lifetime_value_history h
inner join (
    select max(id) as id
    from lifetime_value_history
    where
        channel_id = $1
        and created_at < $2
    group by account_id
) latest on latest.id = h.id
"#;
