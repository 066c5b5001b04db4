//! Benchmarks for the composite read path.
//!
//! Performance-critical paths:
//! - `split_assignees`: reshaping the aggregated username string
//! - `Assembler::board_detail`: board lookup plus concurrent column and task reads

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use taskboard::assembler::Assembler;
use taskboard::domain::{
    ASSIGNEE_DELIMITER, AssignmentInput, BoardInput, ColumnInput, TaskInput, UserInput,
    WorkspaceInput, split_assignees,
};
use taskboard::repository::{
    AssignmentRepository, BoardRepository, ColumnRepository, EntityRepository, TaskRepository,
    UserRepository, WorkspaceRepository,
};
use taskboard::store::{Store, StoreResult};
use tokio::runtime::Runtime;

/// Board with `columns` columns, `tasks_per_column` tasks each, every task
/// assigned to three users.
async fn populated_board(columns: usize, tasks_per_column: usize) -> StoreResult<(Store, i64)> {
    let store = Store::in_memory().await?;
    let users = UserRepository::new(store.clone());
    let mut user_ids = Vec::new();
    for name in ["ann", "bob", "cyd"] {
        user_ids.push(users.create(UserInput::new(name)).await?.id);
    }
    let workspace = WorkspaceRepository::new(store.clone())
        .create(WorkspaceInput::new("Bench", user_ids[0]))
        .await?;
    let board = BoardRepository::new(store.clone())
        .create(BoardInput::new("Board", workspace.id))
        .await?;

    let column_repo = ColumnRepository::new(store.clone());
    let task_repo = TaskRepository::new(store.clone());
    let assignments = AssignmentRepository::new(store.clone());
    for c in 0..columns {
        let position = i64::try_from(c).unwrap_or(i64::MAX);
        let column = column_repo
            .create(ColumnInput::new(format!("col {c}"), board.id, position))
            .await?;
        for t in 0..tasks_per_column {
            let task = task_repo
                .create(TaskInput::new(format!("task {c}.{t}"), column.id))
                .await?;
            for user in &user_ids {
                assignments
                    .assign(AssignmentInput::new(task.id, *user))
                    .await?;
            }
        }
    }
    Ok((store, board.id))
}

fn bench_split_assignees(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_assignees");

    for count in [1usize, 10, 100] {
        let joined = (0..count)
            .map(|i| format!("user-{i:04}"))
            .collect::<Vec<_>>()
            .join(&ASSIGNEE_DELIMITER.to_string());
        group.bench_with_input(BenchmarkId::from_parameter(count), &joined, |b, joined| {
            b.iter(|| split_assignees(black_box(Some(joined.as_str()))));
        });
    }

    group.finish();
}

fn bench_board_detail(c: &mut Criterion) {
    let runtime = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("board_detail");

    for (columns, tasks) in [(3usize, 5usize), (5, 20), (10, 50)] {
        let (store, board_id) = runtime
            .block_on(populated_board(columns, tasks))
            .expect("populate board");
        let assembler = Assembler::new(&store);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{columns}x{tasks}")),
            &board_id,
            |b, &board_id| {
                b.to_async(&runtime)
                    .iter(|| async { assembler.board_detail(black_box(board_id)).await });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_split_assignees, bench_board_detail);
criterion_main!(benches);
