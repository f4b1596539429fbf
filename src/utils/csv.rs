//! Escritura mínima de CSV para las exportaciones de reportes.
//! 
//! El archivo lleva BOM UTF-8 para que Excel detecte la codificación.

const BOM: char = '\u{FEFF}';

#[derive(Debug, Default)]
pub struct CsvWriter {
    lines: Vec<String>,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, columns: &[&str]) -> Self {
        self.push_row(columns.iter().map(|c| c.to_string()));
        self
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = cells
            .into_iter()
            .map(|cell| escape_cell(cell.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.lines.push(line);
    }

    pub fn push_blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Contenido final con BOM
    pub fn finish(self) -> String {
        let mut out = String::new();
        out.push(BOM);
        out.push_str(&self.lines.join("\n"));
        out
    }
}

fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
