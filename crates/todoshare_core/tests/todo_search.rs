use chrono::{DateTime, Duration, TimeZone, Utc};
use todoshare_core::{
    count_tasks, view_shared_lists, view_todos, Priority, SharedList, SharedListSort, SortBy,
    Todo, TodoFilter, TodoQuery,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

fn sample() -> Vec<Todo> {
    let mut todos = vec![
        Todo::new(1, "Write report", Priority::Low, None, base()),
        Todo::new(
            2,
            "buy groceries",
            Priority::High,
            Some(base() + Duration::days(5)),
            base() + Duration::hours(1),
        ),
        Todo::new(
            3,
            "Call plumber",
            Priority::Medium,
            Some(base() + Duration::days(2)),
            base() + Duration::hours(2),
        ),
        Todo::new(4, "Book flights", Priority::High, None, base() + Duration::hours(3)),
    ];
    todos[2].completed = true;
    todos
}

fn ids(todos: &[&Todo]) -> Vec<i64> {
    todos.iter().map(|todo| todo.id).collect()
}

#[test]
fn blank_query_keeps_everything_newest_first() {
    let todos = sample();
    let view = view_todos(&todos, &TodoQuery::new("   "));
    assert_eq!(ids(&view), vec![4, 3, 2, 1]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let todos = sample();
    let view = view_todos(&todos, &TodoQuery::new("B").sorted_by(SortBy::Oldest));
    assert_eq!(ids(&view), vec![2, 3, 4]);

    let none = view_todos(&todos, &TodoQuery::new("zebra"));
    assert!(none.is_empty());
}

#[test]
fn each_sort_key_orders_as_expected() {
    let todos = sample();
    let by = |sort_by| ids(&view_todos(&todos, &TodoQuery::default().sorted_by(sort_by)));

    assert_eq!(by(SortBy::Oldest), vec![1, 2, 3, 4]);
    assert_eq!(by(SortBy::Alphabetical), vec![4, 2, 3, 1]);
    assert_eq!(by(SortBy::Priority), vec![4, 2, 3, 1]);
    assert_eq!(by(SortBy::DueDate), vec![3, 2, 1, 4]);
}

#[test]
fn count_tasks_by_status() {
    let todos = sample();
    let all: Vec<&Todo> = todos.iter().collect();

    assert_eq!(count_tasks(&all, &TodoFilter::All), 4);
    assert_eq!(count_tasks(&all, &TodoFilter::Active), 3);
    assert_eq!(count_tasks(&all, &TodoFilter::Completed), 1);
    assert_eq!(count_tasks(&all, &TodoFilter::from("starred")), 0);
}

#[test]
fn sort_key_parsing_falls_back_to_newest() {
    assert_eq!(SortBy::parse("dueDate"), SortBy::DueDate);
    assert_eq!(SortBy::parse("priority"), SortBy::Priority);
    assert_eq!(SortBy::parse("random"), SortBy::Newest);
}

fn list(share_id: &str, title: &str, shared_by: &str, hours: i64, todo_count: i64) -> SharedList {
    let shared_at = base() + Duration::hours(hours);
    SharedList {
        share_id: share_id.to_string(),
        title: title.to_string(),
        shared_by: shared_by.to_string(),
        shared_at,
        todos: (1..=todo_count)
            .map(|id| Todo::new(id, format!("item {id}"), Priority::Medium, None, shared_at))
            .collect(),
    }
}

#[test]
fn shared_lists_search_title_and_sharer_then_sort() {
    let lists = vec![
        list("a-000001", "Groceries", "alex", 1, 2),
        list("b-000002", "chores", "Jordan", 3, 0),
        list("c-000003", "Trip", "jo", 2, 5),
    ];

    let share_ids = |view: Vec<&SharedList>| -> Vec<String> {
        view.into_iter().map(|l| l.share_id.clone()).collect()
    };

    assert_eq!(
        share_ids(view_shared_lists(&lists, "", SharedListSort::Newest)),
        vec!["b-000002", "c-000003", "a-000001"]
    );
    assert_eq!(
        share_ids(view_shared_lists(&lists, "", SharedListSort::Alphabetical)),
        vec!["b-000002", "a-000001", "c-000003"]
    );
    assert_eq!(
        share_ids(view_shared_lists(&lists, "JO", SharedListSort::Oldest)),
        vec!["c-000003", "b-000002"]
    );
}

#[test]
fn shared_list_preview_and_completion() {
    let mut big = list("c-000003", "Trip", "jo", 2, 5);
    big.todos[0].completed = true;
    let (shown, hidden) = big.preview();
    assert_eq!(shown.len(), 3);
    assert_eq!(hidden, 2);
    assert!((big.completion_ratio() - 0.2).abs() < f64::EPSILON);

    let empty = list("b-000002", "chores", "Jordan", 3, 0);
    assert_eq!(empty.preview().1, 0);
    assert_eq!(empty.completion_ratio(), 0.0);
}
