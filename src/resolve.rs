//! Reference resolution and relativization.

use crate::component::{Authority, Scheme};
use crate::path::Path;
use crate::Uri;

/// Resolves `r` against `base` per
/// [Section 5.3 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.3).
pub(crate) fn resolve(base: &Uri, r: &Uri) -> Uri {
    let (scheme, authority, path, query);
    if r.scheme().is_defined() {
        scheme = r.scheme().clone();
        authority = r.authority().clone();
        path = r.path().remove_dot_segments();
        query = r.query().clone();
    } else if r.authority().is_defined() {
        scheme = base.scheme().clone();
        authority = r.authority().clone();
        path = r.path().remove_dot_segments();
        query = r.query().clone();
    } else if r.path().is_empty() {
        scheme = base.scheme().clone();
        authority = base.authority().clone();
        path = base.path().clone();
        query = if r.query().is_defined() {
            r.query().clone()
        } else {
            base.query().clone()
        };
    } else {
        scheme = base.scheme().clone();
        authority = base.authority().clone();
        path = if r.path().is_absolute() {
            r.path().remove_dot_segments()
        } else {
            merge(base, r.path()).remove_dot_segments()
        };
        query = r.query().clone();
    }
    Uri::from_parts(scheme, authority, path, query, r.fragment().clone())
}

/// Merges a relative path onto a base per
/// [Section 5.3.3 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.3.3).
///
/// The base keeps everything up to but excluding its last segment; a base
/// with an authority and no path contributes a leading slash instead.
pub(crate) fn merge(base: &Uri, rel: &Path) -> Path {
    if base.path().is_empty() {
        if base.authority().is_defined() {
            rel.prepended_slash()
        } else {
            rel.clone()
        }
    } else {
        base.path().merged(rel)
    }
}

/// Finds a reference that resolves to `t` against `base`, the inverse of
/// [`resolve`] where one exists.
///
/// When the scheme or authority differ there is no useful relative form and
/// `t` comes back unchanged. Otherwise the result carries `t`'s query and
/// fragment and a path from [`unmerge`].
pub(crate) fn unresolve(base: &Uri, t: &Uri) -> Uri {
    if base.scheme() != t.scheme() || base.authority() != t.authority() {
        return t.clone();
    }
    let r = Uri::from_parts(
        Scheme::undefined(),
        Authority::undefined(),
        unmerge(base.path(), t.path()),
        t.query().clone(),
        t.fragment().clone(),
    );
    if resolve(base, &r) == *t {
        return r;
    }
    // A path suffix cannot express every target. An empty target path below
    // a non-empty base path needs the authority spelled out, and an empty
    // reference would pick up the base query. Take the nearest wider form.
    if t.path().is_empty() && t.authority().is_defined() {
        return Uri::from_parts(
            Scheme::undefined(),
            t.authority().clone(),
            Path::empty(),
            t.query().clone(),
            t.fragment().clone(),
        );
    }
    if t.path().is_absolute() {
        let r = Uri::from_parts(
            Scheme::undefined(),
            Authority::undefined(),
            t.path().clone(),
            t.query().clone(),
            t.fragment().clone(),
        );
        if resolve(base, &r) == *t {
            return r;
        }
    }
    t.clone()
}

/// Walks `b` and `t` in step and returns the suffix of `t` relative to
/// `b`'s directory: what remains of `t` once `b` reaches its final segment.
/// If the paths part ways before that, no suffix resolves to `t` and `t`
/// comes back whole.
pub(crate) fn unmerge(b: &Path, t: &Path) -> Path {
    if b.is_empty() {
        // A base with an authority and no path gains a leading slash on
        // merge; strip it back off.
        return match t {
            Path::Slash(tail) if !tail.is_empty() => (**tail).clone(),
            _ => t.clone(),
        };
    }
    let whole = t;
    let mut b = b;
    let mut t = t;
    loop {
        if let Path::Segment(_, tail) = b {
            if tail.is_empty() {
                return t.clone();
            }
        }
        match (b, t) {
            (Path::Empty, _) => return t.clone(),
            (Path::Slash(bt), Path::Slash(tt)) => {
                b = bt;
                t = tt;
            }
            (Path::Segment(bs, bt), Path::Segment(ts, tt)) if bs == ts => {
                b = bt;
                t = tt;
            }
            _ => return whole.clone(),
        }
    }
}
