use serde::Serialize;

use crate::cli::OutputFormat;

pub trait TableOutputRow {
    fn print_header();
    fn print_row(&self);
}

pub trait TableOutputDisplay {
    fn print_table(self);
    fn print_table_with_headers(self);
}

impl<I: IntoIterator<Item = T>, T: TableOutputRow> TableOutputDisplay for I {
    fn print_table(self) {
        for row in self {
            row.print_row();
        }
    }

    fn print_table_with_headers(self) {
        T::print_header();
        self.print_table();
    }
}

pub trait SerializableOutputDisplay {
    fn print_json(&self) -> Result<(), serde_json::Error>;
    fn print_json_pretty(&self) -> Result<(), serde_json::Error>;
    fn print_yaml(&self) -> Result<(), serde_yaml::Error>;
}

impl<T: ?Sized + Serialize> SerializableOutputDisplay for T {
    fn print_json(&self) -> Result<(), serde_json::Error> {
        let output = serde_json::to_string(self)?;
        println!("{output}");

        Ok(())
    }

    fn print_json_pretty(&self) -> Result<(), serde_json::Error> {
        let output = serde_json::to_string_pretty(self)?;
        println!("{output}");

        Ok(())
    }

    fn print_yaml(&self) -> Result<(), serde_yaml::Error> {
        let output = serde_yaml::to_string(self)?;
        print!("{output}");

        Ok(())
    }
}

pub trait CliPrint {
    fn print(self, format: OutputFormat) -> anyhow::Result<()>;
}

impl<T: Serialize + TableOutputDisplay> CliPrint for T {
    fn print(self, format: OutputFormat) -> anyhow::Result<()> {
        match format {
            OutputFormat::Table => self.print_table(),
            OutputFormat::TableWithHeaders => self.print_table_with_headers(),
            OutputFormat::Json => self.print_json()?,
            OutputFormat::JsonPretty => self.print_json_pretty()?,
            OutputFormat::Yaml => self.print_yaml()?,
        }

        Ok(())
    }
}
