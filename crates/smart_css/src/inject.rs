//! Handing rendered css over to the environment that applies it

/// Something that makes rendered css take effect, a `<style>` tag, a file, a bundler.
pub trait StyleInjector {
    /// Apply the given css text
    fn inject(&mut self, css: &str);
}

/// Collect into a string, appending on every injection
impl StyleInjector for String {
    fn inject(&mut self, css: &str) {
        self.push_str(css);
    }
}

/// Print the css to stdout, for a bundler reading the output of a build step.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutInjector;

impl StyleInjector for StdoutInjector {
    fn inject(&mut self, css: &str) {
        log::debug!("Emitting css to stdout");
        println!("{css}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_appends() {
        let mut target = String::from(".a{}");
        target.inject(".b{}");
        assert_eq!(target, ".a{}.b{}");
    }
}
