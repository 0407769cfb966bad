use pliant_uri::component::{Authority, Host, Scheme, User};
use pliant_uri::encoding::{decode, encode, table};
use pliant_uri::{Path, Uri};
use proptest::prelude::*;

type Parts = (
    Option<String>,
    Option<String>,
    String,
    Option<u32>,
    Vec<String>,
    bool,
    Vec<(Option<String>, String)>,
    Option<String>,
);

/// URIs with a defined authority, assembled through the public mutators.
///
/// Segments are non-empty and the authority keeps the path rooted, so every
/// generated value prints to a string that reads back as the same value.
fn uris() -> impl Strategy<Value = Uri> {
    let parts = (
        proptest::option::of("[a-z][a-z0-9+.-]{0,4}"),
        proptest::option::of("[a-z]{0,4}"),
        "[a-z0-9.-]{0,8}",
        proptest::option::of(1u32..=65535),
        proptest::collection::vec(".{1,6}", 0..4),
        any::<bool>(),
        proptest::collection::vec((proptest::option::of(any::<String>()), any::<String>()), 0..3),
        proptest::option::of(any::<String>()),
    );
    parts.prop_map(|(scheme, user, host, port, segs, slash, params, frag): Parts| {
        let mut uri = Uri::default().with_host(Host::parse(&host).unwrap());
        if let Some(s) = &scheme {
            uri = uri.with_scheme(Scheme::new(s).unwrap());
        }
        if let Some(u) = &user {
            uri = uri.with_user(User::new(u));
        }
        if let Some(p) = port {
            uri = uri.with_port_number(p);
        }
        for seg in &segs {
            uri = uri.appended_segment(seg);
        }
        if slash {
            uri = uri.appended_slash();
        }
        for (key, value) in &params {
            uri = uri.with_query(uri.query().appended(key.as_deref(), value));
        }
        if let Some(f) = &frag {
            uri = uri.with_fragment_identifier(f);
        }
        uri
    })
}

/// Pairs of URIs sharing a scheme and host.
fn same_origin_pairs() -> impl Strategy<Value = (Uri, Uri)> {
    (uris(), uris(), "[a-z]{1,4}", "[a-z0-9]{1,8}").prop_map(|(a, b, scheme, host)| {
        let scheme = Scheme::new(&scheme).unwrap();
        let host = Host::name(&host);
        (
            a.with_scheme(scheme.clone()).with_host(host.clone()),
            b.with_scheme(scheme).with_host(host),
        )
    })
}

proptest! {
    #[test]
    fn serialization_reads_back_as_the_same_value(uri in uris()) {
        let s = uri.to_string();
        let back = Uri::parse(&s).unwrap();
        prop_assert_eq!(&back, &uri);
        // The printed form is canonical, so it survives a second pass.
        prop_assert_eq!(back.as_str(), s);
    }

    #[test]
    fn encode_then_decode_is_identity(s in any::<String>()) {
        let enc = encode(&s, table::PCHAR);
        prop_assert_eq!(decode(&enc).unwrap(), s.as_str());
    }

    #[test]
    fn dot_removal_is_idempotent_and_complete(
        segs in proptest::collection::vec(
            prop_oneof![Just(".".to_owned()), Just("..".to_owned()), "[a-z]{1,3}"],
            0..6,
        ),
        absolute in any::<bool>(),
        trailing in any::<bool>(),
    ) {
        let mut path = Path::empty();
        for seg in &segs {
            path = path.appended_segment(seg);
        }
        if trailing {
            path = path.appended_slash();
        }
        if absolute {
            path = path.prepended_slash();
        }
        let once = path.remove_dot_segments();
        prop_assert!(once.segments().all(|s| s != "." && s != ".."));
        prop_assert_eq!(&once.remove_dot_segments(), &once);
    }

    #[test]
    fn resolution_outputs_are_dot_free(
        base in uris(),
        r in uris(),
        strip_scheme in any::<bool>(),
        strip_authority in any::<bool>(),
    ) {
        // An empty reference path takes the base path verbatim, so the
        // claim needs a dot-free base.
        let base = base.with_path(base.path().remove_dot_segments());
        let mut r = r;
        if strip_scheme {
            r = r.with_scheme(Scheme::undefined());
        }
        if strip_authority {
            r = r.with_authority(Authority::undefined());
        }
        let out = base.resolve(&r);
        prop_assert!(out.path().segments().all(|s| s != "." && s != ".."));
    }

    #[test]
    fn resolving_the_unresolved_reference_returns_the_target(
        (base, target) in same_origin_pairs(),
    ) {
        // Resolution output is always dot-free, so only normalized targets
        // are reachable.
        let target = target.with_path(target.path().remove_dot_segments());
        let r = base.unresolve(&target);
        prop_assert_eq!(base.resolve(&r), target);
    }
}
