use std::fs;

use ica_ingest::{
    ReadOptions, TextEncoding, WriteOptions, read_csv_table, write_csv_string, write_csv_table,
};

#[test]
fn round_trips_string_table_through_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("raw.csv");
    fs::write(
        &input,
        "Município;Ano de Referência;IN022 - Consumo médio percapita de água\n\
         Belo Horizonte;2020;150,3\n\
         Contagem;---;\n",
    )
    .expect("write input");

    let options = ReadOptions::default().with_delimiter(b';');
    let df = read_csv_table(&input, &options).expect("read csv");
    assert_eq!(df.shape(), (2, 3));

    let output = dir.path().join("out").join("copy.csv");
    write_csv_table(&df, &output, &WriteOptions::default().with_delimiter(b';'))
        .expect("write csv");
    let reread = read_csv_table(&output, &options).expect("reread csv");
    assert!(df.equals_missing(&reread));
}

#[test]
fn latin1_export_reads_accented_headers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("snis.csv");
    fs::write(&input, b"Ano de Refer\xeancia,Tipo de Servi\xe7o\n2021,\xc1gua \n").expect("write");

    let options = ReadOptions::default().with_encoding(TextEncoding::Latin1);
    let df = read_csv_table(&input, &options).expect("read csv");
    let text = write_csv_string(&df, &WriteOptions::default()).expect("render csv");
    assert_eq!(text, "Ano de Referência,Tipo de Serviço\n2021,Água \n");
}
