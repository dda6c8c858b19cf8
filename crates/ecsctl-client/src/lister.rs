//! Page traversal of task listings.

use tracing::debug;

use ecsctl_core::ListTasksFilter;

use crate::error::ClientError;
use crate::platform::TaskPlatform;

/// Walk every page of a listing and return its non-empty ARN batches in page
/// order.
///
/// Batches are only collected here; describing them is left to the caller
/// once traversal is complete, so the listing page size never has to agree
/// with the describe batch limit.
pub async fn collect_task_arn_batches<P>(
    platform: &P,
    filter: &ListTasksFilter,
) -> Result<Vec<Vec<String>>, ClientError>
where
    P: TaskPlatform + ?Sized,
{
    let mut batches = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = platform
            .list_tasks(filter, next_token.as_deref())
            .await
            .map_err(ClientError::ListTasks)?;
        pages += 1;

        debug!(
            cluster = %filter.cluster,
            page = pages,
            tasks = page.task_arns.len(),
            more = page.next_token.is_some(),
            "Listed task page"
        );

        if !page.task_arns.is_empty() {
            batches.push(page.task_arns);
        }

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    Ok(batches)
}
