fn main() {
    ironhall_frontend::run();
}
