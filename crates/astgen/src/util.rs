use std::fmt;

pub fn display_fn<F>(f: F) -> impl fmt::Display
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    struct DisplayFn<F> {
        f: F,
    }
    impl<F> fmt::Display for DisplayFn<F>
    where
        F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
    {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            (self.f)(formatter)
        }
    }
    DisplayFn { f }
}

/// Display the items joined by `sep`, each rendered with `item`.
///
/// `separated(&fields, ", ", |f, field| write!(f, "{} {}", field.ty, field.name))`
pub fn separated<'a, T, F>(items: &'a [T], sep: &'a str, item: F) -> impl fmt::Display + 'a
where
    F: Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result + 'a,
{
    display_fn(move |f| {
        for (i, it) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            item(f, it)?;
        }
        Ok(())
    })
}
