fn main() {
    prost_build::compile_protos(&["proto/graph.proto"], &["proto/"])
        .expect("failed to compile graph.proto");
    println!("cargo:rerun-if-changed=proto/graph.proto");
}
