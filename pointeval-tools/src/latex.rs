//! LaTeX snippets for putting evaluation plots side by side in a paper

use pointeval_core::{EvalError, EvalResult};

/// Creates a `figure` environment with one `subfigure` per image, all sharing the text width evenly.
///
/// Subfigure `i` gets `captions[i]` and the label `fig:<labels[i]>`. The figure itself is captioned and labeled with
/// the last entries of `captions` and `labels`, so pass one more caption and label than images to give the figure its
/// own:
///
/// ```
/// # use pointeval_tools::latex::create_subfigures;
/// let figure = create_subfigures(
///     &["precision.png", "recall.png"],
///     &["Precision", "Recall", "Scan 24"],
///     &["prec", "rec", "scan24"],
/// )
/// .unwrap();
/// assert!(figure.starts_with("\\begin{figure}\n"));
/// assert!(figure.contains("\\begin{subfigure}{0.5\\textwidth}"));
/// assert!(figure.ends_with("\t\\caption{Scan 24}\n\t\\label{fig:scan24}\n\\end{figure}"));
/// ```
///
/// # Errors
///
/// [EvalError::InvalidParameter] if `images` is empty or if there are fewer captions or labels than images
pub fn create_subfigures<I, C, L>(images: &[I], captions: &[C], labels: &[L]) -> EvalResult<String>
where
    I: AsRef<str>,
    C: AsRef<str>,
    L: AsRef<str>,
{
    if images.is_empty() {
        return Err(EvalError::InvalidParameter(
            "A figure needs at least one image".into(),
        ));
    }
    if captions.len() < images.len() || labels.len() < images.len() {
        return Err(EvalError::InvalidParameter(format!(
            "{} images need at least as many captions and labels, but got {} captions and {} labels",
            images.len(),
            captions.len(),
            labels.len()
        )));
    }

    let width_scale = 1.0 / images.len() as f64;
    let mut figure = String::from("\\begin{figure}\n");
    for ((image, caption), label) in images.iter().zip(captions).zip(labels) {
        figure.push_str(&format!(
            "\t\\centering\n\
             \t\\begin{{subfigure}}{{{:.1}\\textwidth}}\n\
             \t\t\\centering\n\
             \t\t\\includegraphics[width=\\textwidth]{{{}}}\n\
             \t\t\\caption{{{}}}\n\
             \t\t\\label{{fig:{}}}\n\
             \t\\end{{subfigure}}\n\
             \t\\hfill\n",
            width_scale,
            image.as_ref(),
            caption.as_ref(),
            label.as_ref()
        ));
    }

    // Both are non-empty since they hold at least as many entries as `images`
    let (Some(figure_caption), Some(figure_label)) = (captions.last(), labels.last()) else {
        return Err(EvalError::InvalidParameter("Missing figure caption".into()));
    };
    figure.push_str(&format!(
        "\t\\caption{{{}}}\n\t\\label{{fig:{}}}\n\\end{{figure}}",
        figure_caption.as_ref(),
        figure_label.as_ref()
    ));
    Ok(figure)
}
