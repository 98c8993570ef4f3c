//! One transform, then one presentation.
//!
//! The driver reaches both services only through [`Transformer`] and
//! [`Presenter`], so each stage can be swapped out in tests.

use crate::error::PipelineError;
use jsx_highlight::{Highlighter, PresentationError};
use jsx_transform::{SourceDocument, TransformConfig, TransformError, TransformOutput};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Turns a document into JavaScript.
pub trait Transformer: Send + Sync + 'static {
    fn transform(
        &self,
        source: &SourceDocument,
        config: &TransformConfig,
    ) -> Result<TransformOutput, TransformError>;
}

/// Decorates text for display.
pub trait Presenter {
    fn present(&self, text: &str, language: &str) -> Result<String, PresentationError>;
}

/// The built-in transform.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsxTransformer;

impl Transformer for JsxTransformer {
    fn transform(
        &self,
        source: &SourceDocument,
        config: &TransformConfig,
    ) -> Result<TransformOutput, TransformError> {
        jsx_transform::transform(source, config)
    }
}

/// ANSI syntax highlighting.
#[derive(Debug, Default, Clone)]
pub struct AnsiPresenter {
    highlighter: Highlighter,
}

impl Presenter for AnsiPresenter {
    fn present(&self, text: &str, language: &str) -> Result<String, PresentationError> {
        self.highlighter.highlight(text, language)
    }
}

/// Options for [`run`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub timeout: Duration,
    /// Tag handed to the presenter along with the transformed text.
    pub language: String,
}

/// Time spent in each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timings {
    pub transform: Duration,
    pub present: Option<Duration>,
}

/// The result of a successful run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Transformed code, undecorated.
    pub code: String,
    /// Text to display: decorated when a presenter ran and succeeded,
    /// otherwise the same as `code`.
    pub display: String,
    pub map: Option<String>,
    pub timings: Timings,
}

/// Transforms `document` on a detached worker thread, then hands the output
/// to `presenter` when there is one.
///
/// A presentation failure is logged and the plain text is used instead;
/// every transform failure, including the timeout, is fatal. A timed-out
/// worker is abandoned: nothing waits for it, so it cannot hold up runtime
/// shutdown or process exit.
pub async fn run<T, P>(
    transformer: Arc<T>,
    presenter: Option<&P>,
    document: SourceDocument,
    config: TransformConfig,
    options: &RunOptions,
) -> Result<Outcome, PipelineError>
where
    T: Transformer,
    P: Presenter + ?Sized,
{
    let document = Arc::new(document);
    let transform_start = Instant::now();

    let (sender, receiver) = oneshot::channel();
    {
        let document = Arc::clone(&document);
        std::thread::Builder::new()
            .name("jsx-transform".to_string())
            .spawn(move || {
                // The receiver is gone once the driver has timed out.
                let _ = sender.send(transformer.transform(&document, &config));
            })
            .map_err(|error| PipelineError::Aborted(error.to_string()))?;
    }
    let output = match tokio::time::timeout(options.timeout, receiver).await {
        Ok(Ok(Ok(output))) => output,
        Ok(Ok(Err(error))) => return Err(PipelineError::transform(error, &document)),
        Ok(Err(_)) => {
            return Err(PipelineError::Aborted(
                "transform worker exited without a result".to_string(),
            ))
        }
        Err(_) => {
            debug!(timeout = ?options.timeout, "abandoning transform worker");
            return Err(PipelineError::TimedOut(options.timeout));
        }
    };
    let transform_time = transform_start.elapsed();
    info!(
        filename = %document.filename,
        bytes = output.code.len(),
        elapsed = ?transform_time,
        "transformed"
    );

    let mut timings = Timings {
        transform: transform_time,
        present: None,
    };
    let display = match presenter {
        Some(presenter) => {
            let present_start = Instant::now();
            let display = match presenter.present(&output.code, &options.language) {
                Ok(rendered) => rendered,
                Err(err) => {
                    warn!("{err}; printing plain output");
                    output.code.clone()
                }
            };
            timings.present = Some(present_start.elapsed());
            display
        }
        None => {
            debug!("presentation skipped");
            output.code.clone()
        }
    };

    Ok(Outcome {
        code: output.code,
        display,
        map: output.map,
        timings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn options() -> RunOptions {
        RunOptions {
            timeout: Duration::from_secs(5),
            language: "js".to_string(),
        }
    }

    #[derive(Debug, Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl Transformer for Counting {
        fn transform(
            &self,
            source: &SourceDocument,
            _config: &TransformConfig,
        ) -> Result<TransformOutput, TransformError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TransformOutput {
                code: source.text.to_uppercase(),
                map: None,
            })
        }
    }

    #[derive(Debug)]
    struct Sleeping(Duration);

    impl Transformer for Sleeping {
        fn transform(
            &self,
            _source: &SourceDocument,
            _config: &TransformConfig,
        ) -> Result<TransformOutput, TransformError> {
            std::thread::sleep(self.0);
            Ok(TransformOutput {
                code: String::new(),
                map: None,
            })
        }
    }

    struct Brackets;

    impl Presenter for Brackets {
        fn present(&self, text: &str, language: &str) -> Result<String, PresentationError> {
            match language {
                "js" => Ok(format!("[{text}]")),
                other => Err(PresentationError::UnknownLanguage(other.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_one_transform_then_presentation() {
        let transformer = Arc::new(Counting::default());
        let outcome = run(
            Arc::clone(&transformer),
            Some(&Brackets),
            SourceDocument::new("a.js", "abc"),
            TransformConfig::default(),
            &options(),
        )
        .await
        .unwrap();

        assert_eq!(transformer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.code, "ABC");
        assert_eq!(outcome.display, "[ABC]");
        assert!(outcome.timings.present.is_some());
    }

    #[tokio::test]
    async fn test_unknown_language_falls_back_to_plain_text() {
        let outcome = run(
            Arc::new(Counting::default()),
            Some(&Brackets),
            SourceDocument::new("a.js", "abc"),
            TransformConfig::default(),
            &RunOptions {
                language: "cobol".to_string(),
                ..options()
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.display, "ABC");
    }

    #[tokio::test]
    async fn test_without_presenter_display_is_code() {
        let outcome = run::<_, Brackets>(
            Arc::new(Counting::default()),
            None,
            SourceDocument::new("a.js", "abc"),
            TransformConfig::default(),
            &options(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.display, outcome.code);
        assert_eq!(outcome.timings.present, None);
    }

    #[tokio::test]
    async fn test_timeout_is_fatal() {
        let err = run(
            Arc::new(Sleeping(Duration::from_millis(500))),
            Some(&Brackets),
            SourceDocument::new("a.js", "abc"),
            TransformConfig::default(),
            &RunOptions {
                timeout: Duration::from_millis(20),
                ..options()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PipelineError::TimedOut(_)));
    }

    #[test]
    fn test_timed_out_transform_does_not_block_shutdown() {
        let started = Instant::now();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let result = runtime.block_on(run(
            Arc::new(Sleeping(Duration::from_secs(30))),
            Some(&Brackets),
            SourceDocument::new("a.js", "abc"),
            TransformConfig::default(),
            &RunOptions {
                timeout: Duration::from_millis(50),
                ..options()
            },
        ));
        drop(runtime);

        assert!(matches!(result, Err(PipelineError::TimedOut(_))));
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "shutdown waited {:?} for the worker",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn test_transform_error_carries_document() {
        let mut config = TransformConfig::default();
        config.plugins = vec![jsx_transform::PluginRef::new("missing")];
        let err = run(
            Arc::new(JsxTransformer),
            Some(&AnsiPresenter::default()),
            SourceDocument::new("App.tsx", "const a = <div />;"),
            config,
            &options(),
        )
        .await
        .unwrap_err();

        let PipelineError::Transform { error, .. } = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(
            error,
            TransformError::UnresolvedPlugin {
                identifier: "missing".into()
            }
        );
    }

    #[tokio::test]
    async fn test_highlighted_demo_keeps_visible_text() {
        let document = SourceDocument::new("App.tsx", "const app = <A><B /></A>;\n");
        let outcome = run(
            Arc::new(JsxTransformer),
            Some(&AnsiPresenter::default()),
            document,
            TransformConfig::default(),
            &options(),
        )
        .await
        .unwrap();

        assert_ne!(outcome.display, outcome.code);
        assert_eq!(jsx_highlight::strip_ansi(&outcome.display), outcome.code);
    }
}
