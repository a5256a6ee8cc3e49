fn main() {
    validator_sheets::run();
}
