//! Namespace resolution against real arrays

#[cfg(test)]
mod tests {
    use crate::backend::{NdArray, NdNamespace};
    use array_api::protocol::HasArrayNamespace;
    use array_api::{
        get_namespace, ApiVersion, ArrayApiError, ArrayRef, Candidate, Capability,
        CapabilitySet, Namespace, NamespaceId, Resolver,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn vector(ns: &NdNamespace, data: Vec<f64>) -> ArrayRef {
        let len = data.len();
        ns.from_vec(data, &[len]).unwrap()
    }

    fn inputs(xs: &[ArrayRef]) -> impl Iterator<Item = &dyn Candidate> {
        xs.iter().map(|x| &**x as &dyn Candidate)
    }

    /// Reports a namespace and nothing else; counts how often it is asked.
    #[derive(Debug, Default)]
    struct NamespaceOnly {
        asked: AtomicUsize,
    }

    impl HasArrayNamespace for NamespaceOnly {
        fn array_namespace(&self, _api_version: Option<&ApiVersion>) -> Namespace {
            self.asked.fetch_add(1, Ordering::SeqCst);
            NdNamespace::new("namespace-only").handle()
        }
    }

    array_api::impl_candidate!(NamespaceOnly: namespace);

    // ============ scenarios ============

    #[test]
    fn test_arrays_of_one_library() {
        let np = NdNamespace::new("numpy");
        let xs = [vector(&np, vec![1.0, 2.0]), vector(&np, vec![3.0])];
        let ns = get_namespace(inputs(&xs)).unwrap();
        assert_eq!(ns, np.handle());
    }

    #[test]
    fn test_plain_values_are_unrecognized() {
        let err = get_namespace([&42i64 as &dyn Candidate, &"str"]).unwrap_err();
        assert_eq!(err, ArrayApiError::UnrecognizedInput);
        assert!(err.is_unrecognized_input());
    }

    #[test]
    fn test_arrays_of_two_libraries() {
        let a = NdNamespace::new("libA");
        let b = NdNamespace::new("libB");
        let xs = [vector(&a, vec![1.0]), vector(&b, vec![2.0])];
        let err = get_namespace(inputs(&xs)).unwrap_err();
        assert_eq!(
            err,
            ArrayApiError::MultipleNamespaces {
                namespaces: vec![NamespaceId::new("libA"), NamespaceId::new("libB")],
            }
        );
        assert_eq!(err.to_string(), "Multiple namespaces for array inputs: {libA, libB}");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            get_namespace(std::iter::empty()),
            Err(ArrayApiError::UnrecognizedInput)
        );
    }

    #[test]
    fn test_missing_extra_capability() {
        let only = NamespaceOnly::default();
        let resolver = Resolver::new().with_capabilities([Capability::ArrayNamespace, Capability::Shape]);
        assert_eq!(
            resolver.resolve([&only as &dyn Candidate]),
            Err(ArrayApiError::UnrecognizedInput)
        );
        assert_eq!(only.asked.load(Ordering::SeqCst), 0);
    }

    // ============ properties ============

    #[test]
    fn test_scalars_mixed_with_arrays() {
        let np = NdNamespace::new("numpy");
        let x = vector(&np, vec![1.0]);
        let ns = get_namespace([&2.0f64 as &dyn Candidate, &*x, &true]).unwrap();
        assert_eq!(ns.id().name, "numpy");
    }

    #[test]
    fn test_full_capability_set() {
        let np = NdNamespace::new("numpy");
        let x = vector(&np, vec![1.0]);
        let only = NamespaceOnly::default();
        let all: CapabilitySet = [
            Capability::ArrayNamespace,
            Capability::DType,
            Capability::Device,
            Capability::Shape,
        ]
        .into();

        // `only` would conflict but lacks the extra capabilities.
        let ns = Resolver::new()
            .with_capabilities(all)
            .resolve([&only as &dyn Candidate, &*x])
            .unwrap();
        assert_eq!(ns.id().name, "numpy");

        let err = get_namespace([&only as &dyn Candidate, &*x]).unwrap_err();
        assert!(err.is_multiple_namespaces());
    }

    #[test]
    fn test_api_version_reaches_the_array() {
        let np = NdNamespace::new("numpy");
        let xs = [vector(&np, vec![1.0]), vector(&np, vec![2.0])];
        let ns = Resolver::new()
            .with_api_version(ApiVersion::V2022_12)
            .resolve(inputs(&xs))
            .unwrap();
        assert_eq!(ns.id().api_version, Some(ApiVersion::V2022_12));
        assert_eq!(ns.id().to_string(), "numpy@2022.12");
    }

    #[test]
    fn test_unknown_api_version_passes_through() {
        let np = NdNamespace::new("numpy");
        let x = vector(&np, vec![1.0]);
        let ns = Resolver::new()
            .with_api_version("2099.01")
            .resolve([&*x as &dyn Candidate])
            .unwrap();
        let version = ns.id().api_version.unwrap();
        assert_eq!(version.as_str(), "2099.01");
        assert!(!version.is_known());
    }

    #[test]
    fn test_conflict_order_is_first_seen() {
        let (a, b, c) = (
            NdNamespace::new("a"),
            NdNamespace::new("b"),
            NdNamespace::new("c"),
        );
        let xs = [
            vector(&c, vec![1.0]),
            vector(&a, vec![1.0]),
            vector(&c, vec![1.0]),
            vector(&b, vec![1.0]),
        ];
        let Err(ArrayApiError::MultipleNamespaces { namespaces }) = get_namespace(inputs(&xs)) else {
            panic!("expected a namespace conflict");
        };
        let names: Vec<_> = namespaces.iter().map(|id| &*id.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let np = NdNamespace::new("numpy");
        let xs = [vector(&np, vec![1.0]), vector(&np, vec![2.0])];
        let first = get_namespace(inputs(&xs)).unwrap();
        let second = get_namespace(inputs(&xs)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolves_across_threads() {
        let np = NdNamespace::new("numpy");
        let xs: Arc<Vec<ArrayRef>> = Arc::new(vec![vector(&np, vec![1.0]), vector(&np, vec![2.0])]);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let xs = Arc::clone(&xs);
                std::thread::spawn(move || get_namespace(inputs(&xs)).map(|ns| ns.id()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(NamespaceId::new("numpy")));
        }
    }

    #[test]
    fn test_same_name_is_same_namespace() {
        let xs = [
            vector(&NdNamespace::new("numpy"), vec![1.0]),
            vector(&NdNamespace::new("numpy"), vec![2.0]),
        ];
        assert!(get_namespace(inputs(&xs)).is_ok());
        let arr = xs[0].as_any().downcast_ref::<NdArray>().unwrap();
        assert_eq!(arr.namespace().name(), "numpy");
    }
}
