fn main() {
    py_workbench::start();
}
