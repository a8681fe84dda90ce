use roller::{rollup, InputOptions, OutputOptions};

#[tokio::main]
async fn main() {
  let mut build = rollup(InputOptions {
    input: Some("crates/roller/examples/basic/entry.js".into()),
    ..Default::default()
  })
  .await
  .expect("build failed");

  let result = build
    .write(OutputOptions {
      format: Some("es".to_string()),
      dir: Some("dist".to_string()),
      ..Default::default()
    })
    .await
    .expect("write failed");

  for output in result.output {
    println!("{}", output.filename());
  }
}
