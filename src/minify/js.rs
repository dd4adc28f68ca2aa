//! JavaScript minification via oxc.

use anyhow::{Result, anyhow};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

/// Minify JavaScript source code.
///
/// Parse errors surface as `Err`; under the default keep-original
/// policy the caller logs and falls back to the input.
pub fn minify_js(source: &str) -> Result<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        let first = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_default();
        return Err(anyhow!("js parse error: {first}"));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_js_basic() {
        let src = "// comment\nconst answer = 40 + 2;\nconsole.log(answer);\n";
        let out = minify_js(src).unwrap();
        assert!(out.len() < src.len());
        assert!(!out.contains("comment"));
    }

    #[test]
    fn test_minify_js_invalid() {
        assert!(minify_js("function { nope").is_err());
        assert!(minify_js("const = ;").is_err());
    }

    #[test]
    fn test_minify_js_empty() {
        let out = minify_js("").unwrap();
        assert!(out.is_empty());
    }
}
