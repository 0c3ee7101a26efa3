use anyhow::Result;
use swc_common::{errors::Handler, sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{Syntax, TsSyntax};

/// Parse transformed output as TypeScript (TSX when `tsx`), emitting any
/// diagnostics to stderr against positions in `code`.
///
/// Errors the parser recovers from still count as a failure.
pub fn parse_output(code: &str, filename: &str, tsx: bool) -> Result<swc_ecma_ast::Module> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        code.to_string(),
    );

    let handler = Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    let syntax = Syntax::Typescript(TsSyntax {
        tsx,
        decorators: true,
        ..Default::default()
    });

    let mut recovered = Vec::new();
    let module = swc_ecma_parser::parse_file_as_module(
        &source_file,
        syntax,
        EsVersion::latest(),
        None,
        &mut recovered,
    )
    .map_err(|e| {
        e.into_diagnostic(&handler).emit();
        anyhow::anyhow!("failed to parse {filename}")
    })?;

    if !recovered.is_empty() {
        let count = recovered.len();
        for e in recovered {
            e.into_diagnostic(&handler).emit();
        }
        anyhow::bail!("{count} syntax error(s) in {filename}");
    }

    Ok(module)
}
