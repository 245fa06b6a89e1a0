//! Some utility functions

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// The data guarded in this crate is always left consistent between two statements, so a poisoned lock is still usable.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Extract a cookie from a `name=value; other=value` cookie string
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';')
        .map(str::trim)
        .find_map(|cookie| {
            let mut parts = cookie.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name => Some(value),
                _ => None,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookies() {
        let jar = "sessionid=abc; csrftoken=T0k3n==; theme=dark";
        assert_eq!(find_cookie(jar, "csrftoken"), Some("T0k3n=="));
        assert_eq!(find_cookie(jar, "theme"), Some("dark"));
        assert_eq!(find_cookie(jar, "token"), None);
        assert_eq!(find_cookie("", "csrftoken"), None);
    }
}
