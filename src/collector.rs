use tracing::trace;

use crate::resolver::Resolution;

/// Flattens a resolution into the resolved capability set.
///
/// Batches are walked in emission order, the final batch last. Empty batches
/// are discarded and the rest are flattened one level. Duplicates are kept;
/// only membership is meaningful.
///
/// # Example
///
/// ```
/// use capgate::{Grants, collect};
///
/// let mut grants = Grants::new();
/// grants.grant(["read"]);
/// grants.grant([]);
/// grants.grant(["read", "update"]);
///
/// assert_eq!(collect(grants.finish(["delete"])), vec!["read", "read", "update", "delete"]);
/// ```
pub fn collect<C>(resolution: Resolution<C>) -> Vec<C> {
    let mut batch_count = 0usize;
    let capabilities: Vec<C> = resolution
        .into_batches()
        .filter(|batch| !batch.is_empty())
        .inspect(|_| batch_count += 1)
        .flatten()
        .collect();

    trace!(
        batches = batch_count,
        capabilities = capabilities.len(),
        "collected capabilities"
    );
    capabilities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Grants;

    #[test]
    fn test_collect_flattens_in_emission_order() {
        let mut grants = Grants::new();
        grants.grant(["yield"]);
        assert_eq!(collect(grants.finish(["return"])), vec!["yield", "return"]);
    }

    #[test]
    fn test_collect_discards_empty_batches() {
        let mut grants: Grants<&str> = Grants::new();
        grants.grant([]).grant(["read"]).grant([]);
        assert_eq!(collect(grants.finish([])), vec!["read"]);
    }

    #[test]
    fn test_collect_nothing() {
        let capabilities: Vec<&str> = collect(Grants::none());
        assert!(capabilities.is_empty());
    }

    #[test]
    fn test_collect_keeps_duplicates() {
        let mut grants = Grants::new();
        grants.grant(["create", "update", "set_role"]);
        grants.grant(["update"]);
        assert_eq!(
            collect(grants.finish([])),
            vec!["create", "update", "set_role", "update"]
        );
    }

    #[test]
    fn test_collect_constant_list() {
        assert_eq!(collect(Resolution::from(vec!["read"])), vec!["read"]);
    }
}
